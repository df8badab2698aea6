use serde::Serialize;

use foglio_client::api::ClientError;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), ClientError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| ClientError::Server(format!("failed to render output: {e}")))?;
    println!("{out}");
    Ok(())
}
