use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{trace, warn};

use crate::constants;
use crate::memcore::MemCore;
use crate::set::{Fault, InstructionSet};
use crate::Word;

/// How a run ended. Invalid operations never end a run; only running off
/// the end of the program tape or one of the two fatal conditions does.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ExitCode {
    Finished,          // ran off the end of the program tape
    TimedOut,          // the watchdog fired before the program finished
    LoopDepthExceeded, // static loop nesting deeper than the configured limit
}

impl ExitCode {
    pub fn failed(self) -> bool {
        self != ExitCode::Finished
    }
}

/// Set-once cancellation flag polled by the fetch loop between
/// instructions. Cloning shares the flag, so a timer thread, a signal
/// handler or a test can flip it while the interpreter holds its own copy.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One-shot wall-clock timer backing a [`CancelToken`](struct.CancelToken.html).
/// Cancels the token once the timeout elapses; dropping the watchdog
/// disarms it, so the token is only cancelled while a run is in flight.
pub struct Watchdog {
    disarm: Sender<()>,
    timer: Option<JoinHandle<()>>,
}

impl Watchdog {
    pub fn arm(token: CancelToken, timeout: Duration) -> Watchdog {
        let (disarm, expired) = mpsc::channel();
        let timer = thread::spawn(move || {
            if expired.recv_timeout(timeout).is_err() {
                token.cancel();
            }
        });
        Watchdog {
            disarm,
            timer: Some(timer),
        }
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        let _ = self.disarm.send(());
        if let Some(timer) = self.timer.take() {
            let _ = timer.join();
        }
    }
}

/// Runs a program to completion under a wall-clock watchdog.
///
/// Counters on the set are reset, the core is pointed at `code` with `pc`
/// zero and its random source reseeded from `rand_seed`, and the program
/// then executes until it runs off the tape, the watchdog fires
/// (`max_rtime` seconds; 0 applies the one-week cap), or loop-table
/// construction measures a nesting depth beyond `max_loop_depth` (negative
/// disables the check).
pub fn run_bytecode(
    iset: &InstructionSet,
    core: &mut MemCore,
    code: &[Word],
    rand_seed: i64,
    max_rtime: u64,
    max_loop_depth: i32,
) -> ExitCode {
    let secs = if max_rtime == 0 {
        constants::MAX_RTIME_CAP
    } else {
        max_rtime
    };

    let token = CancelToken::new();
    let _watchdog = Watchdog::arm(token.clone(), Duration::from_secs(secs));
    run_with_token(iset, core, code, rand_seed, max_loop_depth, &token)
}

/// The fetch loop itself, under a caller-controlled cancellation token.
/// Cancellation is cooperative: the instruction in flight completes first,
/// so a program is stopped at worst one instruction late.
pub fn run_with_token(
    iset: &InstructionSet,
    core: &mut MemCore,
    code: &[Word],
    rand_seed: i64,
    max_loop_depth: i32,
    token: &CancelToken,
) -> ExitCode {
    iset.clear();
    core.begin_run(code, rand_seed, max_loop_depth);

    while (core.pc as usize) < core.code.len() && !token.is_cancelled() {
        let word = core.code[core.pc as usize];
        trace!("pc {}: {}", core.pc, iset.name(word).unwrap_or("?"));

        if let Err(fault) = iset.exec(word, core) {
            warn!("run aborted at pc {}: {:?}", core.pc, fault);
            return match fault {
                Fault::LoopDepthExceeded => ExitCode::LoopDepthExceeded,
            };
        }

        core.pc += 1;
    }

    if token.is_cancelled() {
        ExitCode::TimedOut
    } else {
        ExitCode::Finished
    }
}
