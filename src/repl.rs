use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::scanner;

/// Run the interactive token dump. Each line is scanned independently from a
/// fresh scanner; a lexical error is reported and the loop continues.
pub fn run_repl() {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("cannot start line editor: {e}");
            return;
        }
    };

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);
                match scanner::scan(trimmed) {
                    Ok(tokens) => {
                        for token in &tokens {
                            println!("{token}");
                        }
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("read error: {e}");
                break;
            }
        }
    }
}
