use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use gsm_config::SharedConfig;
use gsm_core::{ChannelDesc, ChannelType};

use super::controllers::TransactionControllers;
use super::dcch_dispatch::DcchDispatcher;
use super::pdch_dispatch::PdchDispatcher;
use super::queue_channel::{ChannelPeer, PacketChannelPeer, queue_channel, queue_packet_channel};
use super::transaction_table::TransactionTable;


/// Running control plane: one worker thread per configured channel.
/// The peers are the data link ends of each channel, to be attached to the radio side.
pub struct ControlPlane {
    pub sdcch: Vec<ChannelPeer>,
    pub tch: Vec<ChannelPeer>,
    pub pdch: Vec<PacketChannelPeer>,
    workers: Vec<JoinHandle<()>>,
}

impl ControlPlane {
    /// Start dispatchers for the SDCCH/4 subchannels on C0T0, one FACCH per traffic
    /// timeslot starting at TN1, and the PDTCHs when GPRS is configured
    pub fn start(
        config: SharedConfig,
        controllers: Arc<dyn TransactionControllers>,
        transactions: Arc<TransactionTable>,
    ) -> io::Result<Self> {
        let cfg = config.config();
        let t200 = cfg.timers.t200();
        let establish_timeout = cfg.timers.establish_timeout();
        let mut workers = Vec::new();

        let mut sdcch = Vec::new();
        for sub in 0..cfg.channels.sdcch_count {
            let desc = ChannelDesc::new(ChannelType::Sdcch, 0, sub);
            let (chan, peer) = queue_channel(desc, t200);
            let mut dispatcher = DcchDispatcher::new(Box::new(chan), controllers.clone(), transactions.clone(), establish_timeout);
            workers.push(spawn_worker(format!("sdcch-{}", sub), move || dispatcher.run())?);
            sdcch.push(peer);
        }

        let mut tch = Vec::new();
        for tn in 1..=cfg.channels.tch_count {
            let desc = ChannelDesc::new(ChannelType::TchFacch, tn, 0);
            let (chan, peer) = queue_channel(desc, t200);
            let mut dispatcher = DcchDispatcher::new(Box::new(chan), controllers.clone(), transactions.clone(), establish_timeout);
            workers.push(spawn_worker(format!("facch-{}", tn), move || dispatcher.run())?);
            tch.push(peer);
        }

        let mut pdch = Vec::new();
        if let Some(ref gprs) = cfg.channels.gprs {
            for idx in 0..gprs.pdch_count {
                let desc = ChannelDesc::new(ChannelType::Pdtch, gprs.timeslot, idx);
                let (chan, peer) = queue_packet_channel(desc, cfg.timers.pdch_poll());
                let mut dispatcher = PdchDispatcher::new(Box::new(chan));
                workers.push(spawn_worker(format!("pdtch-{}-{}", gprs.timeslot, idx), move || dispatcher.run())?);
                pdch.push(peer);
            }
        } else {
            tracing::info!("GPRS not configured, no packet channels started");
        }

        tracing::info!(
            "control plane up: {} SDCCH, {} FACCH, {} PDTCH",
            sdcch.len(),
            tch.len(),
            pdch.len()
        );
        Ok(Self { sdcch, tch, pdch, workers })
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Workers still running. Dispatchers never return, so anything less than
    /// `worker_count()` means a worker panicked.
    pub fn workers_alive(&self) -> usize {
        self.workers.iter().filter(|h| !h.is_finished()).count()
    }

    pub fn worker_names(&self) -> Vec<String> {
        self.workers
            .iter()
            .filter_map(|h| h.thread().name().map(str::to_string))
            .collect()
    }
}

fn spawn_worker<F>(name: String, f: F) -> io::Result<JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    tracing::debug!("spawning worker {}", name);
    thread::Builder::new().name(name).spawn(f)
}
