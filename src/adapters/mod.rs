pub mod mcp_stdio;
pub mod tvmaze_http;
