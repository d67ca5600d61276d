//!
//! The pool running jobs in concurrent local subprocesses.
//!

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::sync::Mutex;

use super::job::Job;
use super::outcome::JobOutcome;
use super::Pool;

///
/// The pool running jobs in concurrent local subprocesses.
///
pub struct LocalPool {
    /// The worker threads, one per concurrent subprocess.
    thread_pool: rayon::ThreadPool,
    /// The outcome sender cloned into every job.
    sender: Mutex<mpsc::Sender<JobOutcome>>,
    /// The outcome receiver.
    receiver: Mutex<mpsc::Receiver<JobOutcome>>,
    /// The number of jobs submitted since the last wait.
    outstanding: AtomicUsize,
}

impl LocalPool {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(parallel_max: usize) -> anyhow::Result<Self> {
        if parallel_max == 0 {
            anyhow::bail!("The local pool needs at least one worker");
        }

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(parallel_max)
            .thread_name(|index| format!("run-worker-{index}"))
            .build()
            .map_err(|error| anyhow::anyhow!("Thread pool configuration failure: {error}"))?;
        let (sender, receiver) = mpsc::channel();

        Ok(Self {
            thread_pool,
            sender: Mutex::new(sender),
            receiver: Mutex::new(receiver),
            outstanding: AtomicUsize::new(0),
        })
    }
}

impl Pool for LocalPool {
    fn submit(&self, job: Job) -> anyhow::Result<()> {
        let sender = self.sender.lock().expect("Sync").clone();
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        self.thread_pool.spawn(move || {
            let _ = sender.send(job.execute());
        });
        Ok(())
    }

    fn wait_all(&self) -> Vec<JobOutcome> {
        let receiver = self.receiver.lock().expect("Sync");
        let outstanding = self.outstanding.swap(0, Ordering::SeqCst);
        (0..outstanding)
            .filter_map(|_| receiver.recv().ok())
            .collect()
    }

    fn is_concurrent(&self) -> bool {
        true
    }
}
