pub use super::giveaway::Entity as Giveaway;
pub use super::giveaway_entry::Entity as GiveawayEntry;
pub use super::poll::Entity as Poll;
pub use super::poll_option::Entity as PollOption;
pub use super::poll_vote::Entity as PollVote;
