/// User-facing actions delivered to the main event loop.
/// Each variant can carry different data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Connect the wallet and load the first listing batch
    Connect,

    /// Drop the session and clear the listing view
    Disconnect,

    /// Reveal the next listing batch (the scroll-proximity signal)
    LoadMore,

    /// Buy one listed NFT
    Buy { token_id: u64 },

    /// List an owned NFT; price is the raw user string, validated later
    List { token_id: u64, price: String },

    /// Ctrl+C or an explicit quit command
    Shutdown,
}

impl Event {
    /// Parse a command line from the terminal adapter.
    /// Returns None for anything unrecognized.
    pub fn parse(line: &str) -> Option<Event> {
        let mut parts = line.split_whitespace();
        match parts.next()? {
            "connect" => Some(Event::Connect),
            "disconnect" => Some(Event::Disconnect),
            "more" => Some(Event::LoadMore),
            "buy" => {
                let token_id = parts.next()?.parse().ok()?;
                Some(Event::Buy { token_id })
            }
            "list" => {
                let token_id = parts.next()?.parse().ok()?;
                let price = parts.next()?.to_string();
                Some(Event::List { token_id, price })
            }
            "quit" | "exit" => Some(Event::Shutdown),
            _ => None,
        }
    }
}
