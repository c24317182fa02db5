//! Hostname resolution for spec tokens that are not address literals.

use std::collections::HashMap;
use std::net::{IpAddr, ToSocketAddrs};

/// Looks up a hostname. An empty result means the lookup failed.
pub trait Resolver {
    fn resolve(&self, host: &str) -> Vec<IpAddr>;
}

/// Resolver backed by the operating system (`getaddrinfo`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    fn resolve(&self, host: &str) -> Vec<IpAddr> {
        match (host, 0).to_socket_addrs() {
            Ok(addrs) => {
                let addrs: Vec<IpAddr> = addrs.map(|a| a.ip()).collect();
                log::debug!("resolved {host} to {} address(es)", addrs.len());
                addrs
            }
            Err(e) => {
                log::debug!("lookup of {host} failed: {e}");
                Vec::new()
            }
        }
    }
}

/// Fixed host table, used where lookups must be reproducible.
#[derive(Debug, Default, Clone)]
pub struct StaticResolver {
    hosts: HashMap<String, Vec<IpAddr>>,
}

impl StaticResolver {
    pub fn new() -> StaticResolver {
        StaticResolver::default()
    }

    /// Add a host entry, returning the resolver for chaining.
    pub fn with_host(mut self, host: &str, addrs: Vec<IpAddr>) -> StaticResolver {
        self.hosts.insert(host.to_lowercase(), addrs);
        self
    }
}

impl Resolver for StaticResolver {
    fn resolve(&self, host: &str) -> Vec<IpAddr> {
        self.hosts
            .get(&host.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}
