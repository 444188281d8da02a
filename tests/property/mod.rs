// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Round-trip and identity properties of the wire codec.

mod round_trip;
