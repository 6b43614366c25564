use chrono::Utc;
use purrdoro_core::{Database, SatietyEngine};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let engine = SatietyEngine::load(&db, Utc::now());
    let state = engine.state();
    let sessions = db.stats()?;

    let stats = serde_json::json!({
        "total_focus_minutes": state.total_focus_minutes,
        "total_pomodoros": state.total_pomodoros,
        "streak_days": state.streak_days,
        "last_focus_date": state.last_focus_date,
        "sessions": sessions,
    });
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
