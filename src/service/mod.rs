//! Business logic layer: the generic lifecycle engine, the two entity-kind
//! strategies plugged into it, and the Discord announcement publisher.

pub mod announcer;
pub mod giveaway;
pub mod lifecycle;
pub mod poll;

use crate::data::giveaway::GiveawayRepository;
use crate::data::poll::PollRepository;
use crate::service::announcer::DiscordAnnouncer;
use crate::service::giveaway::GiveawayKind;
use crate::service::lifecycle::LifecycleManager;
use crate::service::poll::PollKind;

/// Lifecycle manager for giveaways, wired to the production store and
/// publisher.
pub type GiveawayManager = LifecycleManager<GiveawayKind, GiveawayRepository, DiscordAnnouncer>;

/// Lifecycle manager for polls (scheduled and live), wired to the production
/// store and publisher.
pub type PollManager = LifecycleManager<PollKind, PollRepository, DiscordAnnouncer>;
