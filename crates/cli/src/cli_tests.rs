// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use clap::CommandFactory;
use rstest::rstest;

use super::*;

#[test]
fn command_tree_is_well_formed() {
    Cli::command().debug_assert();
}

#[test]
fn parses_create_offer_with_repeatable_flags() {
    let cli = Cli::try_parse_from([
        "storefront",
        "subscriptions",
        "create-offer",
        "sub_1",
        "--territory",
        "USA",
        "--mode",
        "FREE_TRIAL",
        "--duration",
        "ONE_WEEK",
    ])
    .unwrap();

    match cli.command {
        Command::Subscriptions(SubscriptionsCommand::CreateOffer {
            subscription_id,
            territory,
            mode,
            duration,
            periods,
            price_point,
        }) => {
            assert_eq!(subscription_id, "sub_1");
            assert_eq!(territory, "USA");
            assert_eq!(mode, "FREE_TRIAL");
            assert_eq!(duration, "ONE_WEEK");
            assert_eq!(periods, 1);
            assert!(price_point.is_none());
        }
        other => panic!("unexpected parse: {other:?}"),
    }
}

#[rstest]
#[case::offer_without_territory(&["subscriptions", "create-offer", "sub_1", "--mode", "FREE_TRIAL", "--duration", "ONE_WEEK"])]
#[case::offer_without_mode(&["subscriptions", "create-offer", "sub_1", "--territory", "USA", "--duration", "ONE_WEEK"])]
#[case::offer_without_duration(&["subscriptions", "create-offer", "sub_1", "--territory", "USA", "--mode", "FREE_TRIAL"])]
#[case::availability_without_territory(&["subscriptions", "set-availability", "sub_1"])]
#[case::add_builds_without_build(&["beta", "add-builds", "bg_1"])]
#[case::remove_tester_without_group(&["beta", "remove-tester", "tester_1"])]
fn required_flags_are_enforced(#[case] args: &[&str]) {
    let argv = std::iter::once("storefront").chain(args.iter().copied());
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn set_availability_collects_repeated_territories() {
    let cli = Cli::try_parse_from([
        "storefront",
        "subscriptions",
        "set-availability",
        "sub_1",
        "--territory",
        "USA",
        "--territory",
        "GBR",
    ])
    .unwrap();
    match cli.command {
        Command::Subscriptions(SubscriptionsCommand::SetAvailability { territories, .. }) => {
            assert_eq!(territories, ["USA", "GBR"]);
        }
        other => panic!("unexpected parse: {other:?}"),
    }
}

#[test]
fn output_flag_is_global() {
    let cli = Cli::try_parse_from(["storefront", "apps", "list", "--output", "json"]).unwrap();
    assert_eq!(cli.output, OutputMode::Json);
}

#[test]
fn beta_add_tester_accepts_multiple_groups() {
    let cli = Cli::try_parse_from([
        "storefront",
        "beta",
        "add-tester",
        "qa@example.com",
        "--group",
        "bg_1",
        "--group",
        "bg_2",
    ])
    .unwrap();
    match cli.command {
        Command::Beta(BetaCommand::AddTester { email, groups, .. }) => {
            assert_eq!(email, "qa@example.com");
            assert_eq!(groups, ["bg_1", "bg_2"]);
        }
        other => panic!("unexpected parse: {other:?}"),
    }
}
