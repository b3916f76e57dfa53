//! Concurrency-bounded fan-out of PTR queries against a single resolver.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use rand::Rng;
use tokio::net::UdpSocket;

use crate::config::Config;
use crate::dns::message::{build_ptr_query, parse_ptr_reply, Reply};

/// The resolver-facing half of a PTR query: send one question, wait for one
/// answer. `PTRBatch` is generic over this so tests can substitute an
/// in-process fake instead of real UDP sockets — see `SPEC_FULL.md` §9's
/// "tagged interface" note.
#[async_trait::async_trait]
pub trait PtrTransport: Send + Sync {
    async fn query(&self, resolver: IpAddr, ip: Ipv4Addr, config: &Config) -> Option<Reply>;
}

/// The real transport: one UDP socket per query, bound ephemeral, connected
/// to the resolver, torn down as soon as the query settles.
#[derive(Debug, Default)]
pub struct UdpPtrTransport;

#[async_trait::async_trait]
impl PtrTransport for UdpPtrTransport {
    async fn query(&self, resolver: IpAddr, ip: Ipv4Addr, config: &Config) -> Option<Reply> {
        let transaction_id = rand::rng().random();
        let query = build_ptr_query(ip, transaction_id).ok()?;

        let local_addr: SocketAddr = match resolver {
            IpAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            IpAddr::V6(_) => (std::net::Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(local_addr).await.ok()?;
        let remote = SocketAddr::new(resolver, config.dns_port);
        socket.connect(remote).await.ok()?;
        socket.send(&query).await.ok()?;

        let mut buf = [0u8; 512];
        let recv = tokio::time::timeout(config.dns_response_timeout, socket.recv(&mut buf));
        match recv.await {
            Ok(Ok(n)) => parse_ptr_reply(&buf[..n], transaction_id),
            _ => None,
        }
        // `socket` is dropped here on every path, releasing the UDP resource
        // whether the query answered, timed out, or failed to send.
    }
}

/// Resolves a batch of PTR queries against one resolver.
///
/// `ips` is processed in contiguous chunks of `config.query_bucket_size`;
/// within a chunk every query runs concurrently and the chunk completes only
/// once every query in it has either answered or timed out. The returned
/// vector has exactly `ips.len()` entries, in the same order, with `None`
/// wherever the query timed out, the datagram was malformed, or the send
/// itself failed — see `SPEC_FULL.md` §4.3.
pub struct PTRBatch;

impl PTRBatch {
    pub async fn run(resolver: IpAddr, ips: &[Ipv4Addr], config: &Config) -> Vec<Option<Reply>> {
        Self::run_with(&UdpPtrTransport, resolver, ips, config).await
    }

    pub async fn run_with(
        transport: &dyn PtrTransport,
        resolver: IpAddr,
        ips: &[Ipv4Addr],
        config: &Config,
    ) -> Vec<Option<Reply>> {
        if ips.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::with_capacity(ips.len());
        for chunk in ips.chunks(config.query_bucket_size.max(1)) {
            let futures = chunk.iter().map(|ip| transport.query(resolver, *ip, config));
            results.extend(futures::future::join_all(futures).await);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[tokio::test]
    async fn empty_input_returns_empty_output_without_io() {
        let config = Config::default();
        let result = PTRBatch::run("127.0.0.1".parse().unwrap(), &[], &config).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn unreachable_resolver_times_out_to_none() {
        let mut config = Config::default();
        config.dns_response_timeout = std::time::Duration::from_millis(50);
        // TEST-NET-1 (RFC 5737): guaranteed not to answer in CI.
        let resolver: IpAddr = "192.0.2.1".parse().unwrap();
        let ips = [Ipv4Addr::new(192, 0, 2, 2)];
        let result = PTRBatch::run(resolver, &ips, &config).await;
        assert_eq!(result, vec![None]);
    }

    struct FakeTransport(Mutex<HashMap<Ipv4Addr, Reply>>);

    #[async_trait::async_trait]
    impl PtrTransport for FakeTransport {
        async fn query(&self, _resolver: IpAddr, ip: Ipv4Addr, _config: &Config) -> Option<Reply> {
            self.0.lock().unwrap().get(&ip).cloned()
        }
    }

    #[tokio::test]
    async fn preserves_positional_mapping_with_partial_answers() {
        let x = Ipv4Addr::new(10, 0, 0, 1);
        let y = Ipv4Addr::new(10, 0, 0, 2);
        let mut answers = HashMap::new();
        answers.insert(x, Reply { target: "xyz.org.".to_string() });
        let transport = FakeTransport(Mutex::new(answers));

        let config = Config::default();
        let result = PTRBatch::run_with(&transport, "10.0.0.254".parse().unwrap(), &[x, y], &config).await;

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].as_ref().unwrap().target, "xyz.org.");
        assert!(result[1].is_none());
    }

    #[tokio::test]
    async fn chunks_larger_batches_at_the_bucket_boundary() {
        let ips: Vec<Ipv4Addr> = (1..=5).map(|n| Ipv4Addr::new(10, 0, 0, n)).collect();
        let transport = FakeTransport(Mutex::new(HashMap::new()));
        let mut config = Config::default();
        config.query_bucket_size = 2;

        let result = PTRBatch::run_with(&transport, "10.0.0.254".parse().unwrap(), &ips, &config).await;
        assert_eq!(result.len(), 5);
        assert!(result.iter().all(Option::is_none));
    }
}
