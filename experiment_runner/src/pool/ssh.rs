//!
//! The pool running jobs on remote nodes over SSH.
//!

use std::collections::VecDeque;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::sync::Arc;
use std::sync::Condvar;
use std::sync::Mutex;

use super::job::Job;
use super::outcome::JobOutcome;
use super::Pool;

///
/// The pool running jobs on remote nodes over SSH.
///
/// Every node runs one job at a time. Released nodes go to the back of the queue, so
/// jobs rotate over the nodes.
///
pub struct SshPool {
    /// The worker threads, one per node.
    thread_pool: rayon::ThreadPool,
    /// The idle nodes.
    nodes: Arc<NodeQueue>,
    /// The outcome sender cloned into every job.
    sender: Mutex<mpsc::Sender<JobOutcome>>,
    /// The outcome receiver.
    receiver: Mutex<mpsc::Receiver<JobOutcome>>,
    /// The number of jobs submitted since the last wait.
    outstanding: AtomicUsize,
}

impl SshPool {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(nodes: Vec<String>) -> anyhow::Result<Self> {
        if nodes.is_empty() {
            anyhow::bail!("The SSH pool needs at least one node in `--ssh-nodes`");
        }

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(nodes.len())
            .thread_name(|index| format!("ssh-worker-{index}"))
            .build()
            .map_err(|error| anyhow::anyhow!("Thread pool configuration failure: {error}"))?;
        let (sender, receiver) = mpsc::channel();

        Ok(Self {
            thread_pool,
            nodes: Arc::new(NodeQueue::new(nodes)),
            sender: Mutex::new(sender),
            receiver: Mutex::new(receiver),
            outstanding: AtomicUsize::new(0),
        })
    }
}

impl Pool for SshPool {
    fn submit(&self, job: Job) -> anyhow::Result<()> {
        let sender = self.sender.lock().expect("Sync").clone();
        let nodes = self.nodes.clone();
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        self.thread_pool.spawn(move || {
            let node = nodes.acquire();
            let outcome = job.execute_remote(node.as_str());
            nodes.release(node);
            let _ = sender.send(outcome);
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

///
/// The queue of idle nodes.
///
#[derive(Debug)]
pub(crate) struct NodeQueue {
    /// The idle nodes, next to be used first.
    idle: Mutex<VecDeque<String>>,
    /// Signalled on every release.
    released: Condvar,
}

impl NodeQueue {
    ///
    /// A shortcut constructor.
    ///
    pub(crate) fn new(nodes: Vec<String>) -> Self {
        Self {
            idle: Mutex::new(nodes.into()),
            released: Condvar::new(),
        }
    }

    ///
    /// Takes the next idle node, blocking until one is released.
    ///
    pub(crate) fn acquire(&self) -> String {
        let mut idle = self.idle.lock().expect("Sync");
        loop {
            if let Some(node) = idle.pop_front() {
                return node;
            }
            idle = self.released.wait(idle).expect("Sync");
        }
    }

    ///
    /// Returns `node` to the back of the queue.
    ///
    pub(crate) fn release(&self, node: String) {
        self.idle.lock().expect("Sync").push_back(node);
        self.released.notify_one();
    }
}
