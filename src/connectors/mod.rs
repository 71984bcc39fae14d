/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Backend resource handlers
//!
//! A handler serves one object type; the registry orders them for routing.

mod registry;
mod rest;
mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use registry::{ObjectTypeEntry, ObjectTypeInfo, ObjectTypeRegistry};
pub use rest::{build_http_client, RestResource};
pub use traits::{records_from_value, BackendResourceHandler};
