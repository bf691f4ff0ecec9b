use super::App;
use std::path::PathBuf;

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Filter(&'a str),
    Clear,
    Upload(&'a str),
    Favorite,
    Remove,
    Open,
    Help,
    Go(&'a str),
    Unknown(String),
}

fn parse_command(input: &str) -> Option<Command<'_>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut words = trimmed.split_whitespace();
    let name = words.next()?;
    let command = name.to_ascii_lowercase();
    let args = trimmed[name.len()..].trim();

    Some(match command.as_str() {
        "q" | "quit" | "exit" => Command::Quit,
        "f" | "filter" => Command::Filter(args),
        "c" | "clear" => Command::Clear,
        "u" | "upload" | "add" => Command::Upload(args),
        "fav" | "favorite" | "favourite" => Command::Favorite,
        "rm" | "delete" | "del" => Command::Remove,
        "o" | "open" => Command::Open,
        "h" | "help" => Command::Help,
        "go" | "g" => Command::Go(args),
        _ => Command::Unknown(command),
    })
}

impl App {
    /// Enter command mode.
    pub fn enter_command_mode(&mut self) {
        self.ui.command_mode = true;
        self.ui.command_buffer.clear();
    }

    /// Exit command mode without executing.
    pub fn exit_command_mode(&mut self) {
        self.ui.command_mode = false;
        self.ui.command_buffer.clear();
    }

    /// Add character to command buffer.
    pub fn command_input(&mut self, c: char) {
        self.ui.command_buffer.push(c);
    }

    /// Remove last character from command buffer.
    pub fn command_backspace(&mut self) {
        self.ui.command_buffer.pop();
    }

    /// Execute the current command.
    pub fn execute_command(&mut self) {
        let cmd = self.ui.command_buffer.trim().to_string();
        self.ui.command_mode = false;
        self.ui.command_buffer.clear();

        let Some(command) = parse_command(&cmd) else {
            return;
        };

        match command {
            Command::Quit => {
                self.ui.should_quit = true;
            }

            Command::Filter(args) => {
                if args.is_empty() {
                    let names: Vec<String> = self
                        .filter_buttons()
                        .iter()
                        .map(|f| f.display_name())
                        .collect();
                    self.toasts.info(format!("Filters: {}", names.join(", ")));
                } else {
                    let filter = self.config.resolve_filter(&self.gallery, args);
                    self.set_filter(filter);
                }
            }

            Command::Clear => {
                self.clear_filter();
            }

            Command::Upload(args) => {
                if args.is_empty() {
                    self.toasts.info("Usage: :upload <path> [path...]");
                } else {
                    let paths: Vec<PathBuf> = args
                        .split_whitespace()
                        .map(crate::utils::expand_tilde)
                        .collect();
                    self.start_upload(&paths);
                }
            }

            Command::Favorite => {
                self.toggle_favorite_focused();
            }

            Command::Remove => {
                self.request_delete();
            }

            Command::Open => {
                self.open_lightbox();
            }

            Command::Help => {
                self.ui.show_help = true;
            }

            Command::Go(args) => {
                if let Ok(n) = args.parse::<usize>() {
                    if n > 0 && n <= self.gallery.filtered_view().len() {
                        self.selection.cursor = n - 1;
                    }
                }
            }

            Command::Unknown(command) => {
                self.toasts.error(format!("Unknown command: {}", command));
            }
        }
    }
}
