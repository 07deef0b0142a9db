// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod forms;
pub mod ids;
pub mod list;
pub mod model;
mod records;
pub mod state;
pub mod summary;
pub mod theme;
pub mod totals;

pub use forms::*;
pub use ids::*;
pub use list::*;
pub use model::*;
pub use state::*;
pub use summary::*;
pub use theme::*;
pub use totals::*;

pub const APP_NAME: &str = "homedash";
