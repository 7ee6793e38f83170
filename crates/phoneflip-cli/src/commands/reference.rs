use crate::commands::common::{finish, print_json, CliContext};
use crate::error::CliError;

pub async fn run_reference(context: &CliContext, json: bool) -> Result<(), CliError> {
    let mut app = context.build()?;
    let succeeded = app.load_reference_data().await;
    finish(&mut app, succeeded)?;

    let reference = &app.state().reference;
    if json {
        return print_json(reference);
    }
    if reference.is_empty() {
        println!("The server returned no reference data.");
        return Ok(());
    }

    println!("Cities: {}", reference.cities.join(", "));
    println!("Brands:");
    for (brand, models) in reference.brands.iter() {
        println!("  {brand}: {}", models.join(", "));
    }
    println!("Storage: {}", reference.storage_options.join(", "));
    println!("Conditions: {}", reference.condition_options.join(", "));
    Ok(())
}
