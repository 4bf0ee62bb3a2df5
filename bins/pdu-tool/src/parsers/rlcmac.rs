use gsm_core::BitBuffer;
use gsm_pdus::rlcmac::RlcMacBlock;
use gsm_pdus::rlcmac::enums::control_message_type::DlControlMessageType;
use gsm_pdus::rlcmac::enums::payload_type::PayloadType;
use gsm_pdus::rlcmac::pdus::control_block::RlcMacControlBlock;
use gsm_saps::RlcMacFrame;

/// RLC/MAC parser for standalone PDU debugging
pub struct RlcMacParser;

impl RlcMacParser {
    /// Parse an uplink block the way the packet channel loop decodes it
    pub fn parse_ul(pdu: BitBuffer) {
        println!("=== RLC/MAC UL Parser ===");
        println!("Input: {}", pdu.dump_hex());
        println!();

        let frame = RlcMacFrame::from(pdu);
        match RlcMacBlock::peek_payload_type(&frame) {
            Some(pt) => println!("Payload type: {} ({})", pt, pt.into_raw()),
            None => {
                println!("[!] Empty block");
                return;
            }
        }

        match RlcMacBlock::from_frame(&frame) {
            Ok(RlcMacBlock::Data(data)) => {
                println!("{}", data);
                println!("{:#?}", data);
                if data.is_final() {
                    println!("Final block of the TBF, acknowledged with PacketUplinkAckNack");
                }
            }
            Ok(RlcMacBlock::Control(ctrl)) => {
                println!("{}", ctrl);
                println!("{:#?}", ctrl);
            }
            Ok(RlcMacBlock::Reserved) => println!("[!] Reserved payload type, block is ignored"),
            Err(e) => println!("[!] Failed parsing block: {}", e),
        }
    }

    /// Parse a downlink control block. Only PACKET UPLINK ACK/NACK is sent by the control plane.
    pub fn parse_dl(mut pdu: BitBuffer) {
        println!("=== RLC/MAC DL Parser ===");
        println!("Input: {}", pdu.dump_hex());
        println!();

        let Some(pt) = pdu.peek_bits(2).and_then(|raw| PayloadType::try_from(raw).ok()) else {
            println!("[!] Empty block");
            return;
        };
        println!("Payload type: {} ({})", pt, pt.into_raw());
        if pt != PayloadType::Control1 {
            println!("[!] Only control blocks without optional octets are supported");
            return;
        }

        // Message type follows the 8 bit MAC header
        if let Some(raw) = pdu.peek_bits_at(8, 6) {
            match DlControlMessageType::try_from(raw) {
                Ok(t) => println!("Message type: {} ({:#08b})", t, raw),
                Err(_) => println!("Message type: unknown ({:#08b})", raw),
            }
        }

        match RlcMacControlBlock::from_bitbuf(&mut pdu) {
            Ok(block) => {
                println!("{}", block);
                println!("{:#?}", block);
            }
            Err(e) => println!("[!] Failed parsing control block: {}", e),
        }
    }
}
