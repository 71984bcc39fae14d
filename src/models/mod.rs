/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Data models for the data connector
//!
//! Requests as received from the host runtime and the result envelopes
//! returned to it.

mod connection;
mod search;

pub use connection::*;
pub use search::*;
