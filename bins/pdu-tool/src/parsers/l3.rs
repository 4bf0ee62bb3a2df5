use gsm_core::BitBuffer;
use gsm_pdus::l3::enums::protocol_discriminator::ProtocolDiscriminator;
use gsm_pdus::l3::enums::rr_message_type::RrMessageType;
use gsm_pdus::l3::pdus::channel_release::ChannelRelease;
use gsm_pdus::l3::{L3Header, L3Message, MmMessage, RrMessage};
use gsm_saps::L3Frame;

/// L3 parser for standalone PDU debugging
pub struct L3Parser;

impl L3Parser {
    /// Parse an uplink L3 message the way the channel loop decodes it, and print the result
    pub fn parse_ul(mut pdu: BitBuffer) {
        println!("=== L3 UL Parser ===");
        println!("Input: {}", pdu.dump_hex());
        println!();

        let Some(hdr) = Self::parse_header(&mut pdu) else {
            return;
        };

        let frame = L3Frame::from(pdu);
        let msg = match L3Message::from_frame(&frame) {
            Ok(msg) => msg,
            Err(e) => {
                println!("[!] Failed parsing message: {}", e);
                return;
            }
        };
        println!("Message: {}", msg);

        match msg {
            L3Message::Mm(MmMessage::Other { .. }) | L3Message::Rr(RrMessage::Other { .. }) => {
                println!("[!] No decoder for message type {:#04x}, the channel loop would release with cause 0x61", hdr.message_type());
            }
            L3Message::Other { pd, .. } => {
                println!("[!] No dispatcher for protocol discriminator {}", pd);
            }
            L3Message::Mm(mm) => println!("{:#?}", mm),
            L3Message::Rr(rr) => println!("{:#?}", rr),
        }
    }

    /// Parse a downlink L3 message. Only CHANNEL RELEASE is sent by the control plane.
    pub fn parse_dl(mut pdu: BitBuffer) {
        println!("=== L3 DL Parser ===");
        println!("Input: {}", pdu.dump_hex());
        println!();

        let Some(hdr) = Self::parse_header(&mut pdu) else {
            return;
        };

        let is_release = hdr.protocol() == Some(ProtocolDiscriminator::RadioResource)
            && hdr.message_type() as u64 == RrMessageType::ChannelRelease.into_raw();
        if !is_release {
            println!("[!] Unsupported downlink message type {:#04x}", hdr.message_type());
            return;
        }

        match ChannelRelease::from_bitbuf(&mut pdu) {
            Ok(release) => {
                println!("{}", release);
                if pdu.get_len_remaining() > 0 {
                    println!("[!] {} trailing bits: {}", pdu.get_len_remaining(), pdu.dump_bin());
                }
            }
            Err(e) => println!("[!] Failed parsing ChannelRelease: {}", e),
        }
    }

    /// Print the header, leaving the buffer rewound to the start of the message
    fn parse_header(pdu: &mut BitBuffer) -> Option<L3Header> {
        let hdr = L3Header::from_bitbuf(pdu);
        pdu.seek(0);
        match hdr {
            Ok(hdr) => {
                match hdr.protocol() {
                    Some(pd) => println!("Protocol discriminator: {} ({})", pd, hdr.pd),
                    None => println!("Protocol discriminator: reserved ({})", hdr.pd),
                }
                println!("Message type: {:#04x}", hdr.message_type());
                Some(hdr)
            }
            Err(e) => {
                println!("[!] Failed parsing L3 header: {}", e);
                None
            }
        }
    }
}
