// ABOUTME: HTTP middleware module organization for the Barkeep server
// ABOUTME: Exposes request-id tracing middleware shared by all routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Barkeep Project

//! HTTP middleware for the Barkeep server

/// Request-id generation and per-request tracing spans
pub mod request_id;

pub use request_id::request_id_middleware;
