//! The classic decorator walkthroughs, replayed with interceptors.
//!
//! Each demo writes to a [`Transcript`] shared by the wrappers and the target,
//! so the interleaving of wrapper output and target output is preserved.

use std::sync::Arc;

use callwrap_error::Result;
use callwrap_intercept::{
    Args, Behavior, ChainBuilder, FnTarget, Invocable, LogSink, Record, Value,
};
use clap::ValueEnum;
use parking_lot::Mutex;
use tracing::debug;

use crate::targets;

/// Demos selectable on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoArg {
    /// Bread and ingredients wrapped around a sandwich
    Sandwich,
    /// counter(timing(logging(reverse_string)))
    Benchmark,
    /// A hand-written before/after wrapper around a stand-alone function
    Shiny,
}

/// Ordered output lines of a demo
#[derive(Debug, Default)]
pub struct Transcript {
    lines: Mutex<Vec<String>>,
}

impl Transcript {
    /// Empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line written by a target
    pub fn say(&self, line: impl Into<String>) {
        self.lines.lock().push(line.into());
    }

    /// Lines written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl LogSink for Transcript {
    fn write_record(&self, record: &Record) -> Result<()> {
        self.say(record.to_string());
        Ok(())
    }
}

/// Runs a demo and returns its transcript
///
/// # Errors
///
/// Propagates any failure of the wrapped calls.
pub fn run(demo: DemoArg) -> Result<Vec<String>> {
    debug!(?demo, "running demo");
    let transcript = Arc::new(Transcript::new());
    match demo {
        DemoArg::Sandwich => sandwich(&transcript)?,
        DemoArg::Benchmark => benchmark(&transcript)?,
        DemoArg::Shiny => shiny(&transcript)?,
    }
    Ok(transcript.lines())
}

fn sandwich(transcript: &Arc<Transcript>) -> Result<()> {
    let out = transcript.clone();
    let sandwich = FnTarget::new("sandwich", move |args: &Args| {
        let food = args.get(0).and_then(Value::as_str).unwrap_or("--ham--");
        out.say(food);
        Ok(Value::Unit)
    });

    sandwich.invoke(&Args::new())?;

    let chain = ChainBuilder::new(sandwich.shared())
        .sink(transcript.clone())
        .with(Behavior::pre_post("#tomatoes#", "~salad~"))
        .with(Behavior::pre_post("</''''''\\>", "<\\______/>"))
        .build();
    chain.invoke(&Args::new())?;
    Ok(())
}

fn benchmark(transcript: &Arc<Transcript>) -> Result<()> {
    let chain = ChainBuilder::new(targets::reverse())
        .sink(transcript.clone())
        .with(Behavior::Logging)
        .with(Behavior::Timing)
        .with(Behavior::counting())
        .build();

    for text in [
        "Able was I ere I saw Elba",
        "A man, a plan, a canoe, pasta, heros, rajahs, a coloratura, maps, snipe, percale, \
         macaroni, a gag, a banana bag, a tan, a tag, a banana bag again (or a camel), a crepe, \
         pins, Spam, a rut, a Rolo, cash, a jar, sore hats, a peon, a canal: Panama!",
    ] {
        let reversed = chain.invoke(&Args::positional([text]))?;
        transcript.say(reversed.to_string());
    }
    Ok(())
}

fn shiny(transcript: &Arc<Transcript>) -> Result<()> {
    let out = transcript.clone();
    let stand_alone = FnTarget::new("a_stand_alone_function", move |_: &Args| {
        out.say("I am a stand alone function, don't you dare modify me");
        Ok(Value::Unit)
    });

    stand_alone.invoke(&Args::new())?;

    let decorated = ChainBuilder::new(stand_alone.shared())
        .sink(transcript.clone())
        .with(Behavior::pre_post("Before the function runs", "After the function runs"))
        .build();
    decorated.invoke(&Args::new())?;
    Ok(())
}
