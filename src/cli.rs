use crate::common::config::INITIAL_CAPACITY;
use crate::common::exception::CliError;
use crate::common::logger::initialize_logger;
use crate::container::chained_hash_table::ChainedHashTable;
use clap::Parser;
use colored::*;
use rustyline::DefaultEditor;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Starting bucket count for the table.
    #[arg(short, long)]
    capacity: Option<usize>,
}

struct TableCommandExecutor {
    table: ChainedHashTable,
}

impl TableCommandExecutor {
    fn new(table: ChainedHashTable) -> Self {
        Self { table }
    }

    fn execute_command(&mut self, command: &str) {
        let lowered = command.trim().to_lowercase();
        let mut parts = lowered.split_whitespace();

        match parts.next() {
            Some("insert") => match (Self::parse_int(parts.next()), Self::parse_int(parts.next())) {
                (Some(key), Some(value)) => {
                    self.table.insert(key, value);
                    println!("Inserted ({}, {})", key, value);
                }
                _ => println!("{}", "Usage: insert <key> <value>".yellow()),
            },
            Some("remove") => match Self::parse_int(parts.next()) {
                Some(key) => {
                    if self.table.remove(key) {
                        println!("Removed key {}", key);
                    } else {
                        println!("{}", format!("Key {} not found.", key).yellow());
                    }
                }
                None => println!("{}", "Usage: remove <key>".yellow()),
            },
            Some("lookup") => match Self::parse_int(parts.next()) {
                Some(key) => match self.table.get(key) {
                    Some(value) => println!("Key found. Value: {}", value),
                    None => println!("{}", format!("Key {} not found.", key).yellow()),
                },
                None => println!("{}", "Usage: lookup <key>".yellow()),
            },
            Some("rehash") => {
                self.table.rehash();
                println!("Table rehashed to capacity {}", self.table.capacity());
            }
            Some("display") => self.handle_display(),
            Some("status") => self.handle_status(),
            Some("help") => self.display_help(),
            Some(other) => println!("{}", format!("Unknown command: {}", other).red()),
            None => {}
        }
    }

    fn parse_int(token: Option<&str>) -> Option<i64> {
        token.and_then(|t| t.parse().ok())
    }

    fn handle_display(&self) {
        for (index, chain) in self.table.dump_buckets().iter().enumerate() {
            print!("{}", format!("Bucket {:>3}:", index).bold());
            if chain.is_empty() {
                println!(" (empty)");
                continue;
            }
            for (key, value) in chain {
                print!(" ({}, {})", key, value);
            }
            println!();
        }
    }

    fn handle_status(&self) {
        println!("{:<12} {}", "Capacity".bold(), self.table.capacity());
        println!("{:<12} {}", "Size".bold(), self.table.len());
        println!("{:<12} {:.2}", "Load".bold(), self.table.load_factor());
    }

    fn display_help(&self) {
        println!("\n{}", "Available Commands:".bold());
        println!("  insert <key> <value>  - Insert a key-value pair");
        println!("  remove <key>          - Remove the first entry with this key");
        println!("  lookup <key>          - Look up the first value for this key");
        println!("  rehash                - Rebuild the table at double capacity");
        println!("  display               - Print every bucket's chain");
        println!("  status                - Show capacity, size and load factor");
        println!("  help                  - Show this help message");
        println!("  exit                  - Quit");
    }
}

pub fn run_cli() -> Result<(), CliError> {
    initialize_logger();
    let args = Args::parse();

    let capacity = args.capacity.unwrap_or(INITIAL_CAPACITY);
    let table = ChainedHashTable::new(capacity)?;
    let mut executor = TableCommandExecutor::new(table);

    println!("{}", "\nChained Hash Table Shell".blue().bold());
    println!("Type 'help' for commands\n");

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline("ht> ") {
            Ok(line) => {
                let command = line.trim();
                if command.is_empty() {
                    continue;
                }

                rl.add_history_entry(command)?;

                if command == "exit" {
                    println!("Goodbye.");
                    break;
                }

                executor.execute_command(command);
            }
            Err(err) => {
                println!("Error: {}", err);
                break;
            }
        }
    }

    Ok(())
}
