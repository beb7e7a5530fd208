use demodulizer_core::version::{version_string, NAME, VERSION};
use miette::Result;

pub fn run(json: bool) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "name": NAME,
            "version": VERSION,
        });
        println!("{value}");
    } else {
        println!("{}", version_string());
    }
    Ok(())
}
