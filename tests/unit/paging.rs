use mveledziso_backend::error::AppError;
use mveledziso_backend::services::context::ServiceSettings;

fn settings() -> ServiceSettings {
    ServiceSettings {
        default_page_size: 10,
        max_page_size: 100,
        bcrypt_cost: 4,
    }
}

#[test]
fn test_missing_paging_uses_defaults() {
    let page = settings().page(None, None).unwrap();
    assert_eq!(page.offset, 0);
    assert_eq!(page.limit, 10);
}

#[test]
fn test_oversized_page_is_clamped() {
    let page = settings().page(Some(40), Some(5000)).unwrap();
    assert_eq!(page.offset, 40);
    assert_eq!(page.limit, 100);
}

#[test]
fn test_invalid_paging_is_rejected() {
    assert!(matches!(settings().page(Some(-1), None), Err(AppError::Validation { .. })));
    assert!(matches!(settings().page(None, Some(0)), Err(AppError::Validation { .. })));
    assert!(matches!(settings().page(None, Some(-3)), Err(AppError::Validation { .. })));
}
