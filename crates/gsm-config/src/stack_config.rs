use std::sync::Arc;
use std::time::Duration;

/// GPRS packet data channel configuration. Absent means GPRS is disabled.
#[derive(Debug, Clone)]
pub struct CfgGprs {
    /// Timeslot carrying the PDCHs, 1..7 (timeslot 0 carries the C-V combination)
    pub timeslot: u8,
    /// Number of PDTCH dispatchers to start
    pub pdch_count: u8,
}

/// Logical channels to bring up
#[derive(Debug, Clone)]
pub struct CfgChannels {
    /// SDCCH/4 subchannels on C0T0, 1..4
    pub sdcch_count: u8,
    /// Full-rate traffic channels (each with its FACCH), one per timeslot
    pub tch_count: u8,
    pub gprs: Option<CfgGprs>,
}

impl Default for CfgChannels {
    fn default() -> Self {
        Self {
            sdcch_count: 4,
            tch_count: 0,
            gprs: None,
        }
    }
}

/// Timer values used by the channel loops
#[derive(Debug, Clone)]
pub struct CfgTimers {
    /// LAPDm T200 in ms. Read timeout on a dedicated channel is N200 * T200.
    pub t200_ms: u64,
    /// How long to wait for a session ESTABLISH. None waits forever.
    pub establish_timeout_ms: Option<u64>,
    /// Poll interval of the packet channel receiver
    pub pdch_poll_ms: u64,
}

impl Default for CfgTimers {
    fn default() -> Self {
        Self {
            t200_ms: default_t200_ms(),
            establish_timeout_ms: None,
            pdch_poll_ms: default_pdch_poll_ms(),
        }
    }
}

impl CfgTimers {
    pub fn t200(&self) -> Duration {
        Duration::from_millis(self.t200_ms)
    }

    pub fn establish_timeout(&self) -> Option<Duration> {
        self.establish_timeout_ms.map(Duration::from_millis)
    }

    pub fn pdch_poll(&self) -> Duration {
        Duration::from_millis(self.pdch_poll_ms)
    }
}

#[inline]
pub(crate) fn default_t200_ms() -> u64 {
    220
}

#[inline]
pub(crate) fn default_pdch_poll_ms() -> u64 {
    20
}

#[derive(Debug, Clone, Default)]
pub struct StackConfig {
    pub debug_log: Option<String>,
    pub channels: CfgChannels,
    pub timers: CfgTimers,
}

impl StackConfig {
    /// Validate that all configuration fields hold usable values.
    pub fn validate(&self) -> Result<(), &str> {
        if self.channels.sdcch_count == 0 || self.channels.sdcch_count > 4 {
            return Err("sdcch_count must be in 1..=4 (SDCCH/4 on C0T0)");
        }
        // C0T0 is taken by the C-V combination, leaving 7 timeslots
        let mut used_ts = self.channels.tch_count as u32;
        if let Some(ref gprs) = self.channels.gprs {
            if gprs.timeslot == 0 || gprs.timeslot > 7 {
                return Err("gprs timeslot must be in 1..=7");
            }
            if gprs.pdch_count == 0 {
                return Err("gprs pdch_count must be at least 1");
            }
            if gprs.timeslot <= self.channels.tch_count {
                return Err("gprs timeslot collides with a traffic channel timeslot");
            }
            used_ts += 1;
        }
        if used_ts > 7 {
            return Err("more traffic and packet channels than available timeslots");
        }
        if self.timers.t200_ms == 0 {
            return Err("t200_ms must be non-zero");
        }
        if self.timers.pdch_poll_ms == 0 {
            return Err("pdch_poll_ms must be non-zero");
        }
        Ok(())
    }
}

/// Global shared configuration, immutable after construction.
#[derive(Clone)]
pub struct SharedConfig {
    cfg: Arc<StackConfig>,
}

impl SharedConfig {
    pub fn from_config(cfg: StackConfig) -> Self {
        // Check config for validity before returning the SharedConfig object
        match cfg.validate() {
            Ok(_) => {}
            Err(e) => panic!("Invalid stack configuration: {}", e),
        }

        Self { cfg: Arc::new(cfg) }
    }

    /// Access immutable config.
    pub fn config(&self) -> Arc<StackConfig> {
        Arc::clone(&self.cfg)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(StackConfig::default().validate().is_ok());
    }

    #[test]
    fn test_gprs_timeslot_collision() {
        let mut cfg = StackConfig::default();
        cfg.channels.tch_count = 3;
        cfg.channels.gprs = Some(CfgGprs { timeslot: 2, pdch_count: 1 });
        assert!(cfg.validate().is_err());
        cfg.channels.gprs = Some(CfgGprs { timeslot: 4, pdch_count: 1 });
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_sdcch_range() {
        let mut cfg = StackConfig::default();
        cfg.channels.sdcch_count = 0;
        assert!(cfg.validate().is_err());
        cfg.channels.sdcch_count = 5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    #[should_panic(expected = "Invalid stack configuration")]
    fn test_shared_config_rejects_invalid() {
        let mut cfg = StackConfig::default();
        cfg.timers.t200_ms = 0;
        let _ = SharedConfig::from_config(cfg);
    }
}
