/*
 * Data connector, directory-search adapter for REST backends.
 * Copyright (c) 2025 Data Connector contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or any later version.
 */

//! Dispatch services
//!
//! Routing of search requests and assembly of result envelopes.

mod assembler;
pub mod router;

pub use assembler::ResponseAssembler;
pub use router::{route, Route, RouteSource};
