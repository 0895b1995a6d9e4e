//! Story content, one function per day.

use std::io::{BufRead, Write};

use vn_engine::{Engine, Hero, Result, Screen, Story};

/// Every day with content, in play order.
pub fn story<R, W, S>() -> Story<R, W, S>
where
    R: BufRead + 'static,
    W: Write + 'static,
    S: Screen + 'static,
{
    Story::new()
        .day(1, prologue::<R, W, S>)
        .day(2, new_morning::<R, W, S>)
}

// =====================================
// Day 001 - Prologue
// =====================================

fn prologue<R: BufRead, W: Write, S: Screen>(vn: &mut Engine<R, W, S>) -> Result<()> {
    vn.day_screen(1, "Prologue")?;

    vn.show_banner(
        "
        Clayn got stabbed to death and reincarnated as a hero
        to fight a dragon that later became his new wife.
        ",
    )?;
    vn.wait()?;

    let name = vn.ask_text("name", "What is your name? (empty for Clayn)", "Clayn")?;
    let hero = Hero::new(name);
    tracing::debug!("Created {}", hero);

    vn.ask_yes_no("pregnancy", "Do you want pregnancy on?", false)?;

    vn.show_bottom_text(&format!(
        "You wake up at home and notice that you are late for class, {}.",
        hero.name
    ))?;
    vn.wait()?;

    vn.show_bottom_text("You quickly get ready and dash out of the house toward your school.")?;
    vn.wait()?;

    vn.show_bottom_text("On the way, you have to cross the road.")?;
    vn.wait()?;

    vn.end_day(2)
}

// =====================================
// Day 002 - A New Morning
// =====================================

fn new_morning<R: BufRead, W: Write, S: Screen>(vn: &mut Engine<R, W, S>) -> Result<()> {
    vn.day_screen(2, "A New Morning")?;

    let name = vn.get("name", "Clayn");
    vn.show_bottom_text(&format!("Good Morning, {}.", name))?;
    vn.wait()?;

    vn.ask_single_choice(
        "drink",
        "What do you want to drink?",
        &["Coffee", "Tea", "Water"],
        Some("Coffee"),
    )?;

    vn.end_day(3)
}
