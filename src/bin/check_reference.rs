//! Utility to validate the reference data file
//! Usage: cargo run --bin check_reference -- [path] [ingredient grams]

use nutrilog::config::Config;
use nutrilog::nutrition::compute;
use nutrilog::reference::ReferenceTable;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    let args: Vec<String> = std::env::args().collect();
    let path = args
        .get(1)
        .map(std::path::PathBuf::from)
        .unwrap_or(config.reference_path);

    println!("Reference data: {}", path.display());
    println!("Policy: {:?}", config.load_policy);

    let table = ReferenceTable::load(&path, config.load_policy)?;

    println!("Ingredients loaded: {}", table.len());
    println!("Duplicates ignored: {}", table.duplicate_count());
    println!("Rows skipped: {}", table.skipped_rows().len());
    for skipped in table.skipped_rows() {
        println!("  line {}: {}", skipped.row, skipped.reason);
    }

    // Optional sample calculation
    if let (Some(name), Some(grams)) = (args.get(2), args.get(3)) {
        let grams: f64 = grams.parse()?;
        let record = table.find(name)?;
        let today = chrono::Local::now().date_naive();
        let entry = compute(record, grams, today)?;
        println!("\n{:.1} g {}:", entry.quantity_grams, entry.ingredient_name);
        println!("  Protein:  {:.1} g", entry.protein_grams);
        println!("  Carbs:    {:.1} g", entry.carbs_grams);
        println!("  Fats:     {:.1} g", entry.fats_grams);
        println!("  Calories: {:.0} kcal", entry.calories);
    }

    Ok(())
}
