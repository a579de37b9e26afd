//! The `stepwise init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("stepwise.toml").exists() {
        println!("stepwise.toml already exists, skipping.");
    } else {
        std::fs::write("stepwise.toml", SAMPLE_CONFIG)?;
        println!("Created stepwise.toml");
    }

    std::fs::create_dir_all("content")?;
    let sample_path = std::path::Path::new("content/sample.toml");
    if sample_path.exists() {
        println!("content/sample.toml already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_CONTENT)?;
        println!("Created content/sample.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: stepwise validate --content content/sample.toml");
    println!("  2. Run: stepwise path --content content/sample.toml");
    println!("  3. Grade an attempt: stepwise grade --content content/sample.toml --subject greet-1 --answers answers.json --save progress.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# stepwise configuration

[grading]
# Used for lessons and exams without their own passing_score.
default_passing_score = 70.0

[layout]
step = 110.0
unit_gap = 80.0
lanes = [25.0, 65.0]
mascot_every = 4
language = "en"
"#;

const SAMPLE_CONTENT: &str = r#"[[levels]]
id = "a1"
order = 1
translations = [{ language = "en", text = "A1 Beginner" }]

[[levels.units]]
id = "greetings"
order = 1
translations = [{ language = "en", text = "Greetings" }]

[[levels.units.lessons]]
id = "greet-1"
order = 1
translations = [{ language = "en", text = "Saying hello" }]

[[levels.units.lessons.exercises]]
id = "greet-1-a"
order = 1
type = "multiple_choice"
correct_answer = "opt-merhaba"
options = [
    { id = "opt-merhaba", translations = [{ language = "en", text = "Merhaba" }] },
    { id = "opt-tesekkur", translations = [{ language = "en", text = "Teşekkürler" }] },
]

[[levels.units.lessons.exercises]]
id = "greet-1-b"
order = 2
type = "fill_blank"
correct_answer = '["Günaydın", "Gunaydin"]'

[[levels.units.exams]]
id = "greetings-exam"
order = 1

[[levels.units.exams.questions]]
id = "greetings-exam-1"
order = 1
type = "matching"
correct_answer = '[{"left": "hello", "right": "merhaba"}, {"left": "thanks", "right": "teşekkürler"}]'
"#;
