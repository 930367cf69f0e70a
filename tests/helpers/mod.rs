// ABOUTME: Test helper modules for integration tests
// ABOUTME: Re-exports the axum request/response testing utilities

pub mod axum_test;
