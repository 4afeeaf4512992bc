// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![allow(clippy::unwrap_used)]
//! Ordering of pre- and post-call actions across stacked wrappers.

use std::sync::Arc;

use callwrap_intercept::{
    sink::MemorySink, wrap_with_sink, Args, Behavior, BehaviorKind, ChainBuilder, Event, FnTarget,
    Invocable, LogSink, Record, Value,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// A target that records its own execution in `sink`
fn recording_target(sink: Arc<MemorySink>) -> Arc<dyn Invocable> {
    FnTarget::new("f", move |args: &Args| {
        sink.write_record(&Record::new(
            BehaviorKind::PrePost,
            "f",
            Event::Message("target".to_string()),
        ))?;
        Ok(args.get(0).cloned().unwrap_or_default())
    })
    .shared()
}

fn expected_onion(n: usize) -> Vec<String> {
    let mut lines: Vec<String> = (0..n).rev().map(|i| format!("pre{i}")).collect();
    lines.push("target".to_string());
    lines.extend((0..n).map(|i| format!("post{i}")));
    lines
}

#[test]
fn test_sandwich_onion() {
    let sink = Arc::new(MemorySink::new());
    let sandwich = recording_target(sink.clone());

    let with_ingredients =
        wrap_with_sink(sandwich, Behavior::pre_post("#tomatoes#", "~salad~"), sink.clone());
    let with_bread =
        wrap_with_sink(with_ingredients, Behavior::pre_post("</''''''\\>", "<\\______/>"), sink.clone());

    with_bread.invoke(&Args::new()).unwrap();

    assert_eq!(sink.lines(), vec![
        "</''''''\\>",
        "#tomatoes#",
        "target",
        "~salad~",
        "<\\______/>",
    ]);
}

#[test]
fn test_nested_wrap_matches_builder() {
    let nested_sink = Arc::new(MemorySink::new());
    let nested = wrap_with_sink(
        wrap_with_sink(recording_target(nested_sink.clone()), Behavior::pre_post("a<", ">a"), nested_sink.clone()),
        Behavior::pre_post("b<", ">b"),
        nested_sink.clone(),
    );

    let built_sink = Arc::new(MemorySink::new());
    let built = ChainBuilder::new(recording_target(built_sink.clone()))
        .sink(built_sink.clone())
        .with(Behavior::pre_post("a<", ">a"))
        .with(Behavior::pre_post("b<", ">b"))
        .build();

    nested.invoke(&Args::new()).unwrap();
    built.invoke(&Args::new()).unwrap();

    assert_eq!(nested_sink.lines(), built_sink.lines());
    assert_eq!(built_sink.lines(), vec!["b<", "a<", "target", ">a", ">b"]);
}

#[test]
fn test_post_actions_run_on_failure_in_order() {
    let sink = Arc::new(MemorySink::new());
    let failing = FnTarget::new("f", |_: &Args| {
        Err(callwrap_intercept::Error::target_failure("boom"))
    });

    let chain = ChainBuilder::new(failing.shared())
        .sink(sink.clone())
        .with(Behavior::pre_post("in<", ">in"))
        .with(Behavior::pre_post("out<", ">out"))
        .build();

    assert!(chain.invoke(&Args::new()).unwrap_err().is_target_failure());
    assert_eq!(sink.lines(), vec!["out<", "in<", ">in", ">out"]);
}

proptest! {
    #[test]
    fn prop_onion_ordering(n in 0usize..12, x in any::<i64>()) {
        let sink = Arc::new(MemorySink::new());
        let builder = (0..n).fold(
            ChainBuilder::new(recording_target(sink.clone())).sink(sink.clone()),
            |builder, i| builder.with(Behavior::pre_post(format!("pre{i}"), format!("post{i}"))),
        );
        let chain = builder.build();

        let value = chain.invoke(&Args::positional([x])).unwrap();

        prop_assert_eq!(value, Value::Int(x));
        prop_assert_eq!(sink.lines(), expected_onion(n));
        prop_assert_eq!(chain.chain_len(), n + 1);
        prop_assert_eq!(chain.name(), "f");
    }
}
