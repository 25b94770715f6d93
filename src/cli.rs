use clap::Parser;
use std::net::Ipv4Addr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dlnacat",
    about = "UPnP/DLNA media server: announce on the LAN and serve a browsable catalog of your directories",
    long_about = None,
    version = env!("GIT_VERSION"),
    arg_required_else_help = true,
)]
pub struct Args {
    /// One or more directories to publish
    #[arg(num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// HTTP port to listen on [default: 8200]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Friendly server name shown on client device lists [default: dlnacat@<hostname>]
    #[arg(short, long)]
    pub name: Option<String>,

    /// Path to TOML config file (overrides default search: ./dlnacat.toml, ~/.config/dlnacat/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// IPv4 address advertised to clients [default: first non-loopback interface]
    #[arg(long, value_name = "IP")]
    pub host: Option<Ipv4Addr>,

    /// Bind to localhost only (127.0.0.1) and skip SSDP announcements
    #[arg(long)]
    pub localhost: bool,
}
