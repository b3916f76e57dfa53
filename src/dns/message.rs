//! PTR query construction and answer extraction over `hickory-proto`'s DNS
//! wire format, the sibling crate to `hickory-resolver`.

use std::net::Ipv4Addr;

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use hickory_proto::serialize::binary::{BinDecodable, BinEncodable};

use crate::error::Error;

/// A successful PTR answer: the raw target name before short-hostname
/// extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub target: String,
}

/// Builds `<reversed-octets>.in-addr.arpa` for the PTR question name, e.g.
/// `1.0.168.192.in-addr.arpa` for `192.168.0.1`.
fn reverse_arpa_name(ip: Ipv4Addr) -> Result<Name, Error> {
    let [a, b, c, d] = ip.octets();
    Name::from_ascii(format!("{d}.{c}.{b}.{a}.in-addr.arpa.")).map_err(Error::from)
}

/// Encodes a single PTR question with a random transaction id and
/// recursion-desired set, ready to send as a UDP datagram.
pub fn build_ptr_query(ip: Ipv4Addr, transaction_id: u16) -> Result<Vec<u8>, Error> {
    let name = reverse_arpa_name(ip)?;
    let mut message = Message::new();
    message
        .set_id(transaction_id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(name, RecordType::PTR).set_query_class(DNSClass::IN).clone());
    message.to_bytes().map_err(Error::from)
}

/// Parses a raw UDP datagram as a DNS reply, returning the first PTR answer
/// if the transaction id matches and at least one PTR record is present.
/// Any malformed datagram, id mismatch, or answer-free reply yields `None`
/// rather than an error — per the spec, transient query failures are never
/// surfaced to the caller.
pub fn parse_ptr_reply(bytes: &[u8], expected_id: u16) -> Option<Reply> {
    let message = Message::from_bytes(bytes).ok()?;
    if message.id() != expected_id {
        return None;
    }
    message.answers().iter().find_map(|record| {
        if record.record_type() != RecordType::PTR {
            return None;
        }
        match record.data() {
            Some(RData::PTR(name)) => Some(Reply {
                target: name.to_utf8(),
            }),
            _ => None,
        }
    })
}
