//! Write the timesheet API's OpenAPI document to stdout as pretty JSON.

use backend::ApiDoc;
use color_eyre::eyre::{Result, WrapErr};
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("serialising OpenAPI document")?;
    println!("{document}");
    Ok(())
}
