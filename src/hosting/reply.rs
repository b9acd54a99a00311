use crate::roll::Tier;
use actix_web::http::StatusCode;

/// Definite outcome of a player request, rendered as plain text.
///
/// Successes answer 200; every operational failure answers a client-error
/// status with a descriptive body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Invalid,
    Unregistered(String),
    Registered(String),
    AlreadyRegistered(String),
    Drew { name: String, tier: Tier, card: String },
    Adopted { name: String, card: String },
    NoCandidate(String),
    Status { name: String, cards: Vec<String> },
    Supporting { name: String, card: String },
    AlreadySupporting(String),
    SupportFull,
    Withdrawn(String),
    NotSupporting(String),
    Queued(String),
    TooLong(String),
    MailboxFull(String),
}

impl Reply {
    pub fn code(&self) -> StatusCode {
        match self {
            Reply::Registered(_)
            | Reply::Drew { .. }
            | Reply::Adopted { .. }
            | Reply::Status { .. }
            | Reply::Supporting { .. }
            | Reply::Withdrawn(_)
            | Reply::Queued(_) => StatusCode::OK,
            Reply::Invalid | Reply::TooLong(_) => StatusCode::BAD_REQUEST,
            Reply::Unregistered(_) => StatusCode::NOT_FOUND,
            Reply::AlreadyRegistered(_)
            | Reply::NoCandidate(_)
            | Reply::AlreadySupporting(_)
            | Reply::SupportFull
            | Reply::NotSupporting(_) => StatusCode::CONFLICT,
            Reply::MailboxFull(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Reply::Invalid => write!(f, "Invalid player."),
            Reply::Unregistered(name) => write!(f, "{} has not registered yet.", name),
            Reply::Registered(name) => write!(f, "{} has been registered.", name),
            Reply::AlreadyRegistered(name) => write!(f, "{} has already registered.", name),
            Reply::Drew { name, tier, card } => write!(f, "{}'s roll: {} {}", name, tier, card),
            Reply::Adopted { name, card } => write!(f, "{}'s new leader is: {}", name, card),
            Reply::NoCandidate(name) => write!(f, "{} does not have a new card to keep.", name),
            Reply::Status { name, cards } => {
                let cards = cards
                    .iter()
                    .enumerate()
                    .map(|(i, card)| match i {
                        0 => format!("{} (leader)", card),
                        _ => format!("{} (overflow)", card),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}'s box: [{}]", name, cards)
            }
            Reply::Supporting { name, card } => {
                write!(f, "{} is now supporting with {}!", name, card)
            }
            Reply::AlreadySupporting(name) => write!(f, "{} is already supporting.", name),
            Reply::SupportFull => write!(f, "There are too many supporters right now!"),
            Reply::Withdrawn(name) => write!(f, "{} is no longer supporting.", name),
            Reply::NotSupporting(name) => write!(f, "{} is not supporting.", name),
            Reply::Queued(name) => write!(f, "{}'s message has been queued.", name),
            Reply::TooLong(name) => write!(
                f,
                "{} your message cannot be longer than {} characters.",
                name,
                crate::SHOUT_LIMIT
            ),
            Reply::MailboxFull(name) => {
                write!(f, "{} the mailbox is full, try again shortly.", name)
            }
        }
    }
}
