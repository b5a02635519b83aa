pub mod auth_api;
pub mod points_api;
pub mod routes_api;
pub mod schedule_api;
pub mod trucks_api;

use crate::error::{Error, Result};

fn check(errors: Vec<(&'static str, &'static str)>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::validation(errors))
    }
}
