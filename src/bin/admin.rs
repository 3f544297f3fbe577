use clap::{Parser, Subcommand, ValueEnum};
use mveledziso_backend::client::{
    ApiClient, ClientError, ClientResult, ListQuery, ResourceApi, ResourceProvider, ResourceState,
};
use mveledziso_backend::db::models::api::PagedResult;
use mveledziso_backend::db::models::auth::RegisterRequest;
use serde_json::Value;
use tabled::{builder::Builder, settings::Style};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(
    name = "mveledziso-admin",
    version,
    about = "Administer Mveledziso projects from the terminal"
)]
struct Cli {
    /// Base URL of the backend
    #[arg(long, env = "MVELEDZISO_API_URL", default_value = "http://127.0.0.1:8000", global = true)]
    base_url: String,

    /// Access token from `login`
    #[arg(long, env = "MVELEDZISO_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Authenticate and print an access token
    Login {
        #[arg(long)]
        user: String,
        #[arg(long, env = "MVELEDZISO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and print its access token
    Register {
        #[arg(long)]
        user_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
        #[arg(long, env = "MVELEDZISO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List records of an aggregate
    List {
        aggregate: Aggregate,
        #[arg(long)]
        keyword: Option<String>,
        #[arg(long)]
        skip: Option<i64>,
        #[arg(long)]
        take: Option<i64>,
        /// Extra filter as `name=value`, repeatable
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    /// Show one record
    Get { aggregate: Aggregate, id: Uuid },
    /// Create a record from a JSON body
    Create {
        aggregate: Aggregate,
        #[arg(long)]
        json: String,
    },
    /// Update a record from a JSON body
    Update {
        aggregate: Aggregate,
        id: Uuid,
        #[arg(long)]
        json: String,
    },
    /// Delete a record
    Delete { aggregate: Aggregate, id: Uuid },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Aggregate {
    Team, TeamMember, ProjectManager, Project, ProjectDuty, UserDuty, UserTeam, Timeline,
    TimelinePhase, Milestone, Document, Comment, Notification, ActivityLog,
}

impl Aggregate {
    fn route_name(self) -> &'static str {
        match self {
            Aggregate::Team => "Team",
            Aggregate::TeamMember => "TeamMember",
            Aggregate::ProjectManager => "ProjectManager",
            Aggregate::Project => "Project",
            Aggregate::ProjectDuty => "ProjectDuty",
            Aggregate::UserDuty => "UserDuty",
            Aggregate::UserTeam => "UserTeam",
            Aggregate::Timeline => "Timeline",
            Aggregate::TimelinePhase => "TimelinePhase",
            Aggregate::Milestone => "Milestone",
            Aggregate::Document => "Document",
            Aggregate::Comment => "Comment",
            Aggregate::Notification => "Notification",
            Aggregate::ActivityLog => "ActivityLog",
        }
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}

fn parse_body(json: &str) -> ClientResult<Value> {
    serde_json::from_str(json)
        .map_err(|e| ClientError::InvalidInput(format!("--json is not valid JSON: {}", e)))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let mut api = ApiClient::new(cli.base_url).with_token(cli.token);

    match cli.command {
        Command::Login { user, password } => {
            let result = api.authenticate(&user, &password).await?;
            println!("{}", result.access_token);
            eprintln!(
                "Token valid for {}s. Export it as MVELEDZISO_TOKEN for later commands.",
                result.expire_in_seconds
            );
        }
        Command::Register {
            user_name, email, name, surname, password,
        } => {
            let request = RegisterRequest {
                user_name,
                email_address: email,
                name,
                surname,
                password,
            };
            let result = api.register(&request).await?;
            println!("{}", result.access_token);
            eprintln!("Registered user {}.", result.user_id);
        }
        Command::List {
            aggregate, keyword, skip, take, filters,
        } => {
            let query = ListQuery {
                keyword,
                skip_count: skip,
                max_result_count: take,
                filters,
            };
            let provider = ResourceProvider::<PagedResult<Value>>::new(aggregate.route_name());
            provider
                .run(api.get_list(aggregate.route_name(), &query))
                .await?;
            render(provider.state(), |page| {
                format!(
                    "{}\n{} of {} shown",
                    items_table(&page.items),
                    page.items.len(),
                    page.total_count
                )
            })?;
        }
        Command::Get { aggregate, id } => {
            let provider = ResourceProvider::<Value>::new(aggregate.route_name());
            provider.run(api.get(aggregate.route_name(), id)).await?;
            render(provider.state(), record_table)?;
        }
        Command::Create { aggregate, json } => {
            let body = parse_body(&json)?;
            let provider = ResourceProvider::<Value>::new(aggregate.route_name());
            provider
                .run(api.create(aggregate.route_name(), body))
                .await?;
            render(provider.state(), record_table)?;
        }
        Command::Update { aggregate, id, json } => {
            let body = parse_body(&json)?;
            let provider = ResourceProvider::<Value>::new(aggregate.route_name());
            provider
                .run(api.update(aggregate.route_name(), id, body))
                .await?;
            render(provider.state(), record_table)?;
        }
        Command::Delete { aggregate, id } => {
            let provider = ResourceProvider::<()>::new(aggregate.route_name());
            provider.run(api.delete(aggregate.route_name(), id)).await?;
            render(provider.state(), |_| format!("{} {} deleted", aggregate.route_name(), id))?;
        }
    }
    Ok(())
}

/// Prints a settled state.
fn render<T>(state: ResourceState<T>, show: impl FnOnce(&T) -> String) -> ClientResult<()> {
    match state {
        ResourceState::Success(data) => {
            println!("{}", show(&data));
            Ok(())
        }
        ResourceState::Error(message) => Err(ClientError::InvalidResponse(message)),
        ResourceState::Idle | ResourceState::Pending => {
            Err(ClientError::InvalidResponse("Request did not complete".to_string()))
        }
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn items_table(items: &[Value]) -> String {
    let Some(Value::Object(first)) = items.first() else {
        return "(no records)".to_string();
    };
    let columns: Vec<String> = first.keys().cloned().collect();

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(String::as_str));
    for item in items {
        builder.push_record(columns.iter().map(|c| cell(item.get(c).unwrap_or(&Value::Null))));
    }
    builder.build().with(Style::modern()).to_string()
}

fn record_table(record: &Value) -> String {
    let Value::Object(fields) = record else {
        return cell(record);
    };

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (name, value) in fields {
        builder.push_record([name.clone(), cell(value)]);
    }
    builder.build().with(Style::modern()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_split_on_first_equals() {
        assert_eq!(
            parse_filter("teamId=abc=def").unwrap(),
            ("teamId".to_string(), "abc=def".to_string())
        );
        assert!(parse_filter("novalue").is_err());
        assert!(parse_filter("=x").is_err());
    }

    #[test]
    fn aggregate_names_match_routes() {
        assert_eq!(Aggregate::TimelinePhase.route_name(), "TimelinePhase");
        assert_eq!(
            Aggregate::from_str("project-manager", true)
                .unwrap()
                .route_name(),
            "ProjectManager"
        );
    }

    #[test]
    fn items_render_one_row_per_record() {
        let items = vec![
            serde_json::json!({ "id": "1", "name": "Alpha" }),
            serde_json::json!({ "id": "2", "name": null }),
        ];
        let table = items_table(&items);
        assert!(table.contains("Alpha"));
        assert!(table.contains("name"));
        assert_eq!(items_table(&[]), "(no records)");
    }

    #[test]
    fn register_takes_account_fields() {
        let cli = Cli::try_parse_from([
            "mveledziso-admin",
            "register",
            "--user-name",
            "admin",
            "--email",
            "admin@example.com",
            "--name",
            "Thandi",
            "--surname",
            "Mokoena",
            "--password",
            "123qwe",
        ])
        .unwrap();

        match cli.command {
            Command::Register { user_name, email, .. } => {
                assert_eq!(user_name, "admin");
                assert_eq!(email, "admin@example.com");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
