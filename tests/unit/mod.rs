mod dto;
mod paging;
mod query;
