//! Integration tests for the args pipeline module.

mod common;

use acclaunch::args::{
    build_launch_plan, build_launch_plan_from_tokens, option_registry, parse_handoff, tokenize,
    Identity, LaunchContext, LaunchError, LaunchPlan, OptionKind, OptionTable, Routed,
    RoutedArgs, Router, Stream,
};
use common::{config, context, strings, FakeProbe, BOOTSTRAP, CONFIG_XML};

fn plan(raw: &str) -> LaunchPlan {
    plan_with(raw, &context(), &FakeProbe::new())
}

fn plan_with(raw: &str, ctx: &LaunchContext, probe: &FakeProbe) -> LaunchPlan {
    build_launch_plan(raw, ctx, &config(), probe).expect("plan should build")
}

fn route(tokens: &[&str]) -> RoutedArgs {
    route_with(tokens, &FakeProbe::new())
}

fn route_with(tokens: &[&str], probe: &FakeProbe) -> RoutedArgs {
    let table = OptionTable::standard();
    let config = config();
    Router::new(&table, &config, probe)
        .route_all(tokens.iter())
        .expect("tokens should route")
}

fn system_options() -> Vec<String> {
    strings(&[
        "-Dcom.sun.aas.installRoot=/opt/gf",
        "-Djava.security.policy=/opt/gf/lib/appclient/client.policy",
        "-Djava.security.auth.login.config=file:/opt/gf/lib/appclient/appclientlogin.conf",
    ])
}

// =============================================================================
// TOKENIZER
// =============================================================================

#[test]
fn tokenize_preserves_quoted_span() {
    let tokens = tokenize(r#"-client "My App.jar" -name foo"#).unwrap();
    assert_eq!(tokens, strings(&["-client", "My App.jar", "-name", "foo"]));
}

#[test]
fn unterminated_quote_aborts_before_routing() {
    let err = build_launch_plan(r#"-name "oops"#, &context(), &config(), &FakeProbe::new())
        .unwrap_err();
    assert!(matches!(err, LaunchError::Tokenize(_)));
}

// =============================================================================
// REGISTRY
// =============================================================================

#[test]
fn registry_has_three_tables() {
    let count = |kind: OptionKind| option_registry().iter().filter(|d| d.kind == kind).count();
    assert_eq!(count(OptionKind::RuntimeValued), 3);
    assert_eq!(count(OptionKind::FrameworkValued), 9);
    assert_eq!(count(OptionKind::FrameworkFlag), 4);
    assert_eq!(OptionTable::standard().len(), 16);
}

#[test]
fn lookup_is_exact_and_case_sensitive() {
    let table = OptionTable::standard();
    assert!(table.lookup("-client").is_some());
    assert!(table.lookup("-CLIENT").is_none());
    assert!(table.lookup("-clientx").is_none());
    assert!(table.lookup("-cli").is_none());
}

// =============================================================================
// ROUTER
// =============================================================================

#[test]
fn framework_flags_only_reach_framework_stream() {
    for flag in ["-textauth", "-noappinvoke", "-usage", "-help"] {
        let routed = route(&[flag]);
        assert_eq!(routed.framework_args, strings(&[flag]));
        assert!(routed.runtime_args.is_empty(), "{flag} leaked to runtime");
        assert!(routed.app_args.is_empty(), "{flag} leaked to application");
    }
}

#[test]
fn usage_and_help_clear_identity_requirement() {
    assert!(!route(&["-usage"]).identity_required);
    assert!(!route(&["-help"]).identity_required);
    assert!(route(&["-textauth"]).identity_required);
}

#[test]
fn valued_option_claims_dash_value() {
    let routed = route(&["-password", "-secret-", "Main"]);
    assert_eq!(routed.framework_args, strings(&["-password", "-secret-"]));
    assert_eq!(routed.identity, Some(Identity::ClassName("Main".into())));
}

#[test]
fn step_reports_each_transition() {
    let table = OptionTable::standard();
    let config = config();
    let probe = FakeProbe::new();
    let mut router = Router::new(&table, &config, &probe);

    assert_eq!(router.step("-name").unwrap(), Routed::AwaitingValue(Stream::Framework));
    assert_eq!(router.step("foo").unwrap(), Routed::Appended(Stream::Framework));
    assert_eq!(router.step("-cp").unwrap(), Routed::AwaitingValue(Stream::Runtime));
    assert_eq!(router.step("a.jar").unwrap(), Routed::SearchPath);
    assert_eq!(router.step("-Xmx1g").unwrap(), Routed::Appended(Stream::Runtime));
    assert_eq!(router.step("a.b.Main").unwrap(), Routed::Identity);
    assert_eq!(router.step("arg").unwrap(), Routed::Appended(Stream::Application));
    assert!(router.state().identity.is_final());
}

#[test]
fn missing_value_at_end_is_fatal() {
    let table = OptionTable::standard();
    let config = config();
    let probe = FakeProbe::new();
    let err = Router::new(&table, &config, &probe)
        .route_all(["Main", "-name"])
        .unwrap_err();
    assert!(matches!(err, LaunchError::MissingValue { option } if option == "-name"));
}

#[test]
fn unknown_option_before_identity_goes_to_runtime() {
    let routed = route(&["-Xmx512m", "-Dfoo=bar", "Main"]);
    assert_eq!(routed.runtime_args, strings(&["-Xmx512m", "-Dfoo=bar"]));
}

#[test]
fn everything_after_final_identity_goes_to_application() {
    let routed = route(&["Main", "-verbose", "input.txt", "Other"]);
    assert_eq!(routed.identity, Some(Identity::ClassName("Main".into())));
    assert_eq!(routed.app_args, strings(&["-verbose", "input.txt", "Other"]));
    assert!(routed.runtime_args.is_empty());
}

#[test]
fn jar_resolves_identity_and_forwards_tail() {
    let routed = route(&["-jar", "app.jar", "extra1", "extra2"]);
    assert_eq!(
        routed.identity,
        Some(Identity::Archive {
            path: "app.jar".into(),
            runnable: true
        })
    );
    assert_eq!(routed.app_args, strings(&["extra1", "extra2"]));
}

#[test]
fn jar_setting_ends_option_processing() {
    let routed = route(&["-jar", "app.jar", "-cp", "extra.jar", "-name", "foo", "-usage"]);
    assert_eq!(
        routed.app_args,
        strings(&["-cp", "extra.jar", "-name", "foo", "-usage"])
    );
    assert!(routed.search_path.is_empty());
    assert!(routed.framework_args.is_empty());
    assert!(routed.identity_required);
}

#[test]
fn class_name_identity_still_honors_options() {
    let routed = route(&["Main", "-name", "foo"]);
    assert_eq!(routed.framework_args, strings(&["-name", "foo"]));
    assert!(routed.app_args.is_empty());
}

#[test]
fn whitespace_only_tokens_are_dropped() {
    let table = OptionTable::standard();
    let config = config();
    let probe = FakeProbe::new();
    let mut router = Router::new(&table, &config, &probe);

    assert_eq!(router.step(" ").unwrap(), Routed::Skipped);
    assert_eq!(router.step("Main").unwrap(), Routed::Identity);
    assert_eq!(router.step("\t").unwrap(), Routed::Skipped);
    assert_eq!(router.step("").unwrap(), Routed::Appended(Stream::Application));

    let routed = router.finish().unwrap();
    assert_eq!(routed.identity, Some(Identity::ClassName("Main".into())));
    assert_eq!(routed.app_args, strings(&[""]));
}

#[test]
fn relative_client_directory_is_made_absolute() {
    let probe = FakeProbe::new().with_dir("clients/app");
    let routed = route_with(&["-client", "clients/app"], &probe);
    let expected = std::env::current_dir().unwrap().join("clients/app");
    assert_eq!(
        routed.identity,
        Some(Identity::Directory(expected.display().to_string()))
    );
}

#[test]
fn tentative_identity_keeps_unknown_options_on_runtime() {
    let routed = route(&["-client", "app.jar", "extra", "-Dlate=1"]);
    assert_eq!(routed.app_args, strings(&["extra"]));
    assert_eq!(routed.runtime_args, strings(&["-Dlate=1"]));
}

#[test]
fn later_client_option_overrides_tentative_identity() {
    let routed = route(&["-client", "first.jar", "-client", "second.jar"]);
    assert_eq!(
        routed.identity,
        Some(Identity::Archive {
            path: "second.jar".into(),
            runnable: true
        })
    );
    assert!(routed.framework_args.is_empty());
}

#[test]
fn client_option_after_final_identity_is_forwarded() {
    let routed = route(&["Main", "-client", "late.jar"]);
    assert_eq!(routed.identity, Some(Identity::ClassName("Main".into())));
    assert_eq!(routed.app_args, strings(&["-client", "late.jar"]));
}

#[test]
fn class_file_token_is_final() {
    let routed = route(&["Hello.class", "Another.class"]);
    assert_eq!(routed.identity, Some(Identity::ClassFile("Hello.class".into())));
    assert_eq!(routed.app_args, strings(&["Another.class"]));
}

#[test]
fn probe_failure_carries_path() {
    let probe = FakeProbe::new().with_failure("locked.jar");
    let table = OptionTable::standard();
    let config = config();
    let err = Router::new(&table, &config, &probe)
        .route_all(["-client", "locked.jar"])
        .unwrap_err();
    assert!(
        matches!(&err, LaunchError::Probe { path, .. } if path.to_str() == Some("locked.jar"))
    );
}

// =============================================================================
// PLAN
// =============================================================================

#[test]
fn client_archive_plan() {
    let p = plan("-client app.jar -name foo");

    assert_eq!(
        p.framework_handoff,
        format!("mode=acscript,arg=-configxml,arg={CONFIG_XML},arg=-name,arg=foo,client=jar=app.jar")
    );
    assert_eq!(p.main_clause, strings(&["-jar", "app.jar"]));
    let mut expected = system_options();
    expected.extend(strings(&["-classpath", BOOTSTRAP]));
    assert_eq!(p.runtime_options, expected);
    assert!(p.app_args.is_empty());
    assert!(!p.needs_usage());
}

#[test]
fn full_command_line_order() {
    let p = plan("-Xmx1g -client app.jar -textauth arg1");
    assert_eq!(
        p.command_line(),
        format!(
            "java {} -Xmx1g -classpath {BOOTSTRAP} \
             -javaagent:{BOOTSTRAP}=mode=acscript,arg=-configxml,arg={CONFIG_XML},arg=-textauth,client=jar=app.jar \
             -jar app.jar \"arg1\"",
            system_options().join(" ")
        )
    );
    assert_eq!(
        p.runtime_command_line,
        format!(
            "java {} -Xmx1g -classpath {BOOTSTRAP} -jar app.jar",
            system_options().join(" ")
        )
    );
}

#[test]
fn directory_client_runs_bootstrap_archive() {
    let probe = FakeProbe::new().with_dir("/clients/app");
    let p = plan_with("-client /clients/app", &context(), &probe);

    assert!(p.framework_handoff.contains("client=dir=/clients/app"));
    assert_eq!(p.main_clause, strings(&["-jar", BOOTSTRAP]));
    assert!(!p.command_line().contains("-jar /clients/app"));
}

#[test]
fn secondary_archive_runs_bootstrap_archive() {
    let p = plan("-client suite.ear");
    assert!(p.framework_handoff.ends_with("client=jar=suite.ear"));
    assert_eq!(p.main_clause, strings(&["-jar", BOOTSTRAP]));
}

#[test]
fn class_file_runs_bootstrap_archive() {
    let p = plan("Hello.class");
    assert!(p.framework_handoff.ends_with("client=classfile=Hello.class"));
    assert_eq!(p.main_clause, strings(&["-jar", BOOTSTRAP]));
}

#[test]
fn class_name_runs_directly() {
    let p = plan("com.example.Main one two");
    assert!(p.framework_handoff.ends_with("client=class=com.example.Main"));
    assert_eq!(p.main_clause, strings(&["com.example.Main"]));
    assert_eq!(p.app_args, strings(&["one", "two"]));
    assert!(p.command_line().ends_with(r#"com.example.Main "one" "two""#));
}

#[test]
fn exactly_one_identity_clause() {
    let p = plan("-client a.jar -client b.jar x -client c.jar");
    let clauses: Vec<_> = parse_handoff(&p.framework_handoff)
        .into_iter()
        .filter(|(key, _)| key == "client")
        .collect();
    assert_eq!(clauses, vec![("client".to_string(), "jar=c.jar".to_string())]);

    let p = plan("Main -client late.jar");
    assert!(p.framework_handoff.ends_with("client=class=Main"));
    assert_eq!(p.app_args, strings(&["-client", "late.jar"]));
}

#[test]
fn default_search_path_is_exact() {
    let p = plan("Main");
    let idx = p.runtime_options.iter().position(|o| o == "-classpath").unwrap();
    assert_eq!(p.runtime_options[idx + 1], BOOTSTRAP);
    assert_eq!(p.runtime_options.len(), idx + 2);
}

#[test]
fn user_search_path_precedes_default() {
    let p = plan("-cp /u/a.jar:/u/b.jar Main");
    assert!(p.runtime_options.ends_with(&strings(&[
        "-classpath",
        &format!("/u/a.jar:/u/b.jar:{BOOTSTRAP}"),
    ])));
}

#[test]
fn both_search_path_spellings_merge_in_order() {
    let p = plan("-classpath first.jar -cp second.jar Main");
    assert!(p
        .runtime_options
        .contains(&format!("first.jar:second.jar:{BOOTSTRAP}")));
}

#[test]
fn search_path_entry_with_space_is_quoted() {
    let p = plan(r#"-cp "/My Libs/x.jar" Main"#);
    assert!(p
        .command_line()
        .contains(&format!("-classpath \"/My Libs/x.jar\":{BOOTSTRAP}")));
}

#[test]
fn probed_runtime_layout_extends_default() {
    let ctx = context().with_search_path("/usr/local/bin:/opt/jdk/bin");
    let probe = FakeProbe::new()
        .with_file("/opt/jdk/bin/java")
        .with_dir("/opt/jdk/jre/lib/ext")
        .with_dir("/opt/jdk/lib/ext");
    let p = plan_with("Main", &ctx, &probe);
    assert!(p
        .runtime_options
        .contains(&format!("{BOOTSTRAP}:/opt/jdk/jre/lib/ext")));
}

#[test]
fn probed_runtime_falls_back_to_second_layout() {
    let ctx = context().with_search_path("/opt/jdk/bin");
    let probe = FakeProbe::new()
        .with_file("/opt/jdk/bin/java")
        .with_dir("/opt/jdk/lib/ext");
    let p = plan_with("Main", &ctx, &probe);
    assert!(p
        .runtime_options
        .contains(&format!("{BOOTSTRAP}:/opt/jdk/lib/ext")));
}

#[test]
fn first_launcher_on_search_path_wins_even_without_layout() {
    let ctx = context().with_search_path("/usr/bin:/opt/jdk/bin");
    let probe = FakeProbe::new()
        .with_file("/usr/bin/java")
        .with_file("/opt/jdk/bin/java")
        .with_dir("/opt/jdk/jre/lib/ext");
    let p = plan_with("Main", &ctx, &probe);
    assert!(p.runtime_options.ends_with(&strings(&["-classpath", BOOTSTRAP])));
}

#[test]
fn user_search_path_skips_probing() {
    let ctx = context().with_search_path("/opt/jdk/bin");
    let probe = FakeProbe::new()
        .with_file("/opt/jdk/bin/java")
        .with_dir("/opt/jdk/jre/lib/ext");
    let p = plan_with("-cp a.jar Main", &ctx, &probe);
    assert!(p.runtime_options.contains(&format!("a.jar:{BOOTSTRAP}")));
}

#[test]
fn vm_args_seed_runtime_stream() {
    let ctx = context().with_vm_args("-Xmx1g -cp /vm/x.jar -Dp=1");
    let p = plan_with("-cp /u.jar Main", &ctx, &FakeProbe::new());
    let mut expected = system_options();
    expected.extend(strings(&[
        "-Xmx1g",
        "-Dp=1",
        "-classpath",
        &format!("/vm/x.jar:/u.jar:{BOOTSTRAP}"),
    ]));
    assert_eq!(p.runtime_options, expected);
}

#[test]
fn bare_vm_arg_is_rejected() {
    let ctx = context().with_vm_args("-Xmx1g stray");
    let err = build_launch_plan("Main", &ctx, &config(), &FakeProbe::new()).unwrap_err();
    assert!(matches!(err, LaunchError::UnrecognizedVmArg { arg } if arg == "stray"));
}

#[test]
fn appcpath_follows_mode() {
    let ctx = context().with_appcpath("/x/a.jar:/x/b.jar");
    let p = plan_with("Main", &ctx, &FakeProbe::new());
    assert!(p
        .framework_handoff
        .starts_with("mode=acscript,appcpath=/x/a.jar:/x/b.jar,arg=-configxml"));
}

#[test]
fn legacy_config_file_is_used_when_primary_missing() {
    let probe = FakeProbe::new().with_file("/opt/gf/domains/domain1/config/sun-acc.xml");
    let p = plan_with("Main", &context(), &probe);
    assert!(p
        .framework_handoff
        .contains("arg=/opt/gf/domains/domain1/config/sun-acc.xml"));
}

#[test]
fn framework_values_are_encoded() {
    let p = plan(r#"-name "My Client, v2" Main"#);
    assert!(p.framework_handoff.contains("arg=My%20Client%2C%20v2"));
    let decoded: Vec<_> = parse_handoff(&p.framework_handoff)
        .into_iter()
        .filter(|(k, _)| k == "arg")
        .map(|(_, v)| v)
        .collect();
    assert!(decoded.contains(&"My Client, v2".to_string()));
}

#[test]
fn app_args_with_spaces_are_quoted() {
    let p = plan(r#"Main "hello world" plain"#);
    assert_eq!(p.app_args, strings(&["hello world", "plain"]));
    assert!(p.command_line().ends_with(r#"Main "hello world" "plain""#));
}

#[test]
fn client_path_with_space_is_quoted_in_main_clause() {
    let p = plan(r#"-client "My App.jar""#);
    assert_eq!(p.main_clause, strings(&["-jar", "\"My App.jar\""]));
    assert!(p.framework_handoff.ends_with("client=jar=My%20App.jar"));
}

#[test]
fn jar_setting_keeps_tail_out_of_launcher() {
    let p = plan("-jar app.jar -cp extra.jar -name foo -usage");
    assert_eq!(
        p.app_args,
        strings(&["-cp", "extra.jar", "-name", "foo", "-usage"])
    );
    assert!(p.runtime_options.ends_with(&strings(&["-classpath", BOOTSTRAP])));
    assert_eq!(
        p.framework_handoff,
        format!("mode=acscript,arg=-configxml,arg={CONFIG_XML},client=jar=app.jar")
    );
}

#[test]
fn client_path_with_delimiters_survives_handoff() {
    let p = plan(r#"-client "My Apps,v2.jar" -name foo"#);
    let items = parse_handoff(&p.framework_handoff);
    assert_eq!(
        items.last(),
        Some(&("client".to_string(), "jar=My Apps,v2.jar".to_string()))
    );
    assert_eq!(items.iter().filter(|(key, _)| key == "client").count(), 1);
    assert!(p.framework_handoff.ends_with("client=jar=My%20Apps%2Cv2.jar"));
}

#[test]
fn app_args_with_shell_metacharacters_are_escaped() {
    let p = build_launch_plan_from_tokens(
        &strings(&["Main", r#"say "hi there""#, "$HOME", "a`b`"]),
        &context(),
        &config(),
        &FakeProbe::new(),
    )
    .unwrap();
    assert_eq!(p.app_args, strings(&[r#"say "hi there""#, "$HOME", "a`b`"]));
    assert!(p
        .command_line()
        .ends_with(r#"Main "say \"hi there\"" "\$HOME" "a\`b\`""#));
}

#[test]
fn interpreter_from_context() {
    let ctx = context().with_interpreter("/jdk/bin/java");
    let p = plan_with("Main", &ctx, &FakeProbe::new());
    assert!(p.command_line().starts_with("/jdk/bin/java -D"));
}

// =============================================================================
// USAGE POLICY
// =============================================================================

#[test]
fn empty_input_requests_usage() {
    let p = plan("");
    assert!(p.framework_handoff.ends_with("arg=-usage"));
    assert!(!p.identity_required);
    assert!(p.identity.is_none());
    assert!(p.main_clause.is_empty());
    assert!(!p.needs_usage());
}

#[test]
fn no_identity_reruns_with_usage() {
    let p = plan("-textauth -user bob");
    assert!(p
        .framework_handoff
        .ends_with("arg=-textauth,arg=-user,arg=bob,arg=-usage"));
    assert!(!p.identity_required);
}

#[test]
fn help_does_not_add_usage() {
    let p = plan("-help");
    assert!(p.framework_handoff.ends_with("arg=-help"));
    assert!(!p.framework_handoff.contains("-usage"));
}

#[test]
fn tokens_and_raw_string_agree() {
    let from_raw = plan(r#"-client "My App.jar" -name foo"#);
    let from_tokens = build_launch_plan_from_tokens(
        &strings(&["-client", "My App.jar", "-name", "foo"]),
        &context(),
        &config(),
        &FakeProbe::new(),
    )
    .unwrap();
    assert_eq!(from_raw, from_tokens);
}

#[test]
fn planning_is_idempotent() {
    let ctx = context()
        .with_vm_args("-Xss2m")
        .with_appcpath("/x.jar")
        .with_search_path("/opt/jdk/bin");
    let probe = FakeProbe::new().with_file("/opt/jdk/bin/java").with_dir("/opt/jdk/lib/ext");
    let raw = r#"-Dx=1 -cp a.jar -client "My App.jar" -name n -textauth arg1 "arg 2""#;
    let first = plan_with(raw, &ctx, &probe);
    let second = plan_with(raw, &ctx, &probe);
    assert_eq!(first, second);
    assert_eq!(first.command_line(), second.command_line());
}
