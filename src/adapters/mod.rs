mod dds_client_http;

pub use dds_client_http::HttpDdsClient;
