//! The `hygiene init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("hygiene.toml").exists() {
        println!("hygiene.toml already exists, skipping.");
    } else {
        std::fs::write("hygiene.toml", SAMPLE_CONFIG)?;
        println!("Created hygiene.toml");
    }

    std::fs::create_dir_all("audits")?;
    let example_path = std::path::Path::new("audits/example.toml");
    if example_path.exists() {
        println!("audits/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_AUDIT)?;
        println!("Created audits/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Record answers and points in audits/example.toml");
    println!("  2. Run: hygiene validate --audit audits/example.toml");
    println!("  3. Run: hygiene score --audit audits/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# hygiene configuration

output_dir = "./hygiene-results"
default_format = "json"

# Percentage points a section or overall score may drop before `compare`
# reports it as a regression.
regression_threshold = 5.0

# Allowed gap between the sum of section weightages and 100.
weightage_tolerance = 0.01

# Award points by answer when an answered item has none recorded.
derive_missing_points = false
"#;

const EXAMPLE_AUDIT: &str = r#"[audit]
id = "example"
name = "Example Kitchen Audit"
client_name = "Example Hospitality Group"
hotel_name = "Example Hotel"
inspector = "A. Inspector"
date_of_audit = "2026-01-15"

[[sections]]
id = "personal-hygiene"
name = "Personal Hygiene"
weightage = 40

[[sections.items]]
id = "ph-1"
question = "Food handlers wear clean uniforms and hair restraints"
tpp = 10
answer = "Complying"
points = 10

[[sections.items]]
id = "ph-2"
question = "Hand wash stations are stocked with soap and paper towels"
tpp = 10
answer = "Need Improvement"
points = 5
comment = "Paper towels ran out during lunch service"

[[sections]]
id = "storage"
name = "Food Storage"
weightage = 60

[[sections.items]]
id = "st-1"
question = "Chillers hold food at 5C or below"
tpp = 10
answer = "Complying"
points = 10

[[sections.items]]
id = "st-2"
question = "Raw and cooked foods are stored separately"
tpp = 10
answer = "NC"
points = 0

[[sections.items]]
id = "st-3"
question = "Dry store has pest control records"
tpp = 5
answer = "NA"
"#;
