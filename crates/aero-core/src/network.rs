//! Network interface detection for display during setup.
//!
//! Parses `ip -4 addr` output into interface name / IPv4 address pairs.

use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Interface header line: `2: eth0: <BROADCAST,...>` or `3: veth0@if5: ...`.
static IFACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+:\s+([^:@\s]+)").expect("Invalid interface regex"));

/// Address line: `    inet 192.168.1.10/24 brd ...`.
static INET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+inet\s+(\S+)").expect("Invalid inet regex"));

/// One interface with its IPv4 address in CIDR notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    /// Interface name (e.g., "eth0").
    pub name: String,
    /// Address with prefix length (e.g., "192.168.1.10/24").
    pub address: String,
}

/// Run `ip -4 addr` and parse the result.
///
/// Any failure (missing `ip`, non-zero exit) yields an empty list.
pub fn detect_network_interfaces() -> Vec<NetworkInterface> {
    match Command::new("ip").args(["-4", "addr"]).output() {
        Ok(output) if output.status.success() => {
            parse_ip_addr(&String::from_utf8_lossy(&output.stdout))
        }
        Ok(output) => {
            debug!(status = %output.status, "ip -4 addr failed");
            Vec::new()
        }
        Err(e) => {
            debug!(error = %e, "could not run ip");
            Vec::new()
        }
    }
}

/// Parse `ip -4 addr` output, in interface order.
///
/// Interfaces without an IPv4 address are skipped; when an interface lists
/// several addresses the last one is kept.
pub fn parse_ip_addr(output: &str) -> Vec<NetworkInterface> {
    let mut interfaces: Vec<NetworkInterface> = Vec::new();
    let mut current: Option<String> = None;

    for line in output.lines() {
        if let Some(caps) = IFACE_REGEX.captures(line) {
            current = Some(caps[1].to_string());
            continue;
        }
        let (Some(name), Some(caps)) = (&current, INET_REGEX.captures(line)) else {
            continue;
        };
        let address = caps[1].to_string();
        match interfaces.iter_mut().find(|i| &i.name == name) {
            Some(existing) => existing.address = address,
            None => interfaces.push(NetworkInterface {
                name: name.clone(),
                address,
            }),
        }
    }

    interfaces
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536 qdisc noqueue state UNKNOWN group default qlen 1000
    inet 127.0.0.1/8 scope host lo
       valid_lft forever preferred_lft forever
2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc fq_codel state UP group default qlen 1000
    inet 192.168.1.10/24 brd 192.168.1.255 scope global dynamic eth0
       valid_lft 85000sec preferred_lft 85000sec
3: wlan0: <NO-CARRIER,BROADCAST,MULTICAST,UP> mtu 1500 qdisc noqueue state DOWN group default qlen 1000
4: veth1@if9: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc noqueue state UP group default
    inet 10.0.0.2/16 scope global veth1
    inet 10.0.0.3/16 scope global secondary veth1
";

    #[test]
    fn test_parse_sample() {
        let interfaces = parse_ip_addr(SAMPLE);
        let names: Vec<&str> = interfaces.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["lo", "eth0", "veth1"]);
        assert_eq!(interfaces[1].address, "192.168.1.10/24");
    }

    #[test]
    fn test_last_address_wins() {
        let interfaces = parse_ip_addr(SAMPLE);
        assert_eq!(interfaces[2].address, "10.0.0.3/16");
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_ip_addr("").is_empty());
        assert!(parse_ip_addr("    inet 1.2.3.4/8 scope global\n").is_empty());
    }
}
