use core::fmt;

/// Logical channel types the control plane runs dispatchers on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    /// Stand-alone dedicated control channel
    Sdcch,
    /// Fast associated control channel of a full-rate traffic channel
    TchFacch,
    /// Packet data traffic channel
    Pdtch,
    /// Common control channel (paging / access grant)
    Ccch,
}

impl ChannelType {
    /// Channels that can carry dedicated-signaling procedures (location updating, IMSI detach)
    pub fn is_dedicated_signaling(self) -> bool {
        self == ChannelType::Sdcch
    }

    /// Channels that can carry traffic-channel procedures (assignment)
    pub fn is_traffic(self) -> bool {
        self == ChannelType::TchFacch
    }

    pub fn is_packet_data(self) -> bool {
        self == ChannelType::Pdtch
    }

    /// LAPDm N200, maximum number of retransmissions, GSM 04.06 5.8.2
    pub fn n200(self) -> u32 {
        match self {
            ChannelType::Sdcch => 23,
            ChannelType::TchFacch => 34,
            ChannelType::Pdtch | ChannelType::Ccch => 5,
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelType::Sdcch => write!(f, "SDCCH"),
            ChannelType::TchFacch => write!(f, "FACCH/TCH/F"),
            ChannelType::Pdtch => write!(f, "PDTCH"),
            ChannelType::Ccch => write!(f, "CCCH"),
        }
    }
}

/// Identity of one logical channel instance on the C0 carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelDesc {
    pub chan_type: ChannelType,
    /// Timeslot number, 0..7
    pub tn: u8,
    /// Subchannel within the timeslot (SDCCH/4 has 4, SDCCH/8 has 8, others 1)
    pub subchannel: u8,
}

impl ChannelDesc {
    pub fn new(chan_type: ChannelType, tn: u8, subchannel: u8) -> Self {
        assert!(tn < 8, "timeslot out of range: {}", tn);
        Self { chan_type, tn, subchannel }
    }
}

impl fmt::Display for ChannelDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.chan_type {
            ChannelType::Sdcch => write!(f, "SDCCH/4-{} TN{}", self.subchannel, self.tn),
            _ => write!(f, "{} TN{}", self.chan_type, self.tn),
        }
    }
}
