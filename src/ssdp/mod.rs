//! SSDP presence: periodic multicast `NOTIFY ssdp:alive`.

pub mod announcer;
pub mod messages;
pub mod socket;

pub use announcer::{Announcer, AnnouncerConfig, DatagramSink};
