//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `mandalart_core` linkage without the Flutter runtime.
//! - Print the static role/theme layout of the 9x9 board.

use mandalart_core::{resolve_role, CellPos, CellRole, GRID_SIZE};

fn main() {
    println!("mandalart_core ping={}", mandalart_core::ping());
    println!("mandalart_core version={}", mandalart_core::core_version());
    println!(
        "mandalart_core db_path={}",
        mandalart_core::resolve_db_path().display()
    );

    for (index, pos) in CellPos::all().enumerate() {
        let descriptor = resolve_role(pos);
        let marker = match descriptor.role {
            CellRole::CoreGoal => "**",
            CellRole::SubGoal => "sg",
            CellRole::SyncedCenter => "=>",
            CellRole::ActionPlan => "..",
        };
        let theme = descriptor.theme.map_or("-", |theme| theme.label());
        print!("{marker}:{theme:<7}");
        if (index + 1) % GRID_SIZE == 0 {
            println!();
        } else {
            print!(" ");
        }
    }
}
