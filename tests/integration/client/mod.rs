//! Client integration tests against a mocked HTTP server

mod http_api_test;
