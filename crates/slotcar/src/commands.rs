//! Command ingestion. Producers may live on any thread; the controller drains the inbox once
//! per tick, so each tick sees whole commands in arrival order.

use crossbeam_channel::{unbounded, Receiver, Sender};
use slotcar_core::{Command, ModeRequest, PathRequest};

use crate::{Result, SlotcarError};

pub fn command_channel() -> (CommandSender, CommandInbox) {
    let (tx, rx) = unbounded();
    (CommandSender { tx }, CommandInbox { rx })
}

#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<Command>,
}

impl CommandSender {
    pub fn send(&self, command: Command) -> Result<()> {
        self.tx.send(command).map_err(|err| SlotcarError::InboxClosed {
            robot: err.into_inner().robot_name().to_string(),
        })
    }

    pub fn send_path(&self, request: PathRequest) -> Result<()> {
        self.send(Command::Path(request))
    }

    pub fn send_mode(&self, request: ModeRequest) -> Result<()> {
        self.send(Command::Mode(request))
    }
}

#[derive(Debug)]
pub struct CommandInbox {
    rx: Receiver<Command>,
}

impl CommandInbox {
    /// Everything queued so far. Never blocks.
    pub fn drain(&self) -> Vec<Command> {
        self.rx.try_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }
}
