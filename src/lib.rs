//! UPnP/DLNA MediaServer: SSDP presence, ContentDirectory and ConnectionManager
//! SOAP control, and a DIDL-Lite catalog built from local directories.

pub mod catalog;
pub mod cds;
pub mod cli;
pub mod cms;
pub mod config;
pub mod http;
pub mod media;
pub mod soap;
pub mod ssdp;
