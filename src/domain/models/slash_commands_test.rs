use super::QuickAction;
use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    let text = "";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_space_only() {
    let text = " ";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_single_slash() {
    let text = "/";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_invalid_prefix() {
    let text = "!q";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_plain_question() {
    let text = "What properties do you have in Dubai?";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_valid_prefix() {
    let text = "/q";
    let cmd = SlashCommand::parse(text);
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_parse_surrounding_whitespace() {
    let cmd = SlashCommand::parse(" /clear \n").unwrap();
    assert!(cmd.is_clear());
}

#[test]
fn it_parse_rejects_trailing_words() {
    assert!(SlashCommand::parse("/properties in Accra with 3 beds").is_none());
    assert!(SlashCommand::parse("/clear now please").is_none());
    assert!(SlashCommand::parse("/q\tnow").is_none());
}

#[test]
fn it_is_quit() {
    for text in ["/q", "/quit", "/exit"] {
        assert!(SlashCommand::parse(text).unwrap().is_quit());
    }
}

#[test]
fn it_is_clear() {
    for text in ["/c", "/clear"] {
        assert!(SlashCommand::parse(text).unwrap().is_clear());
    }
}

#[test]
fn it_is_help() {
    for text in ["/h", "/help"] {
        assert!(SlashCommand::parse(text).unwrap().is_help());
    }
}

#[test]
fn it_maps_quick_actions() {
    let cases = [
        ("/p", QuickAction::Properties),
        ("/properties", QuickAction::Properties),
        ("/t", QuickAction::VirtualTours),
        ("/tours", QuickAction::VirtualTours),
        ("/l", QuickAction::Locations),
        ("/locations", QuickAction::Locations),
        ("/a", QuickAction::Assist),
        ("/assist", QuickAction::Assist),
    ];

    for (text, action) in cases {
        let cmd = SlashCommand::parse(text).unwrap();
        assert_eq!(cmd.quick_action(), Some(action));
        assert!(!cmd.is_quit());
    }
}

#[test]
fn it_has_canned_questions() {
    assert_eq!(
        QuickAction::Properties.question(),
        "What properties do you have?"
    );
    assert_eq!(
        QuickAction::VirtualTours.question(),
        "Do you have any virtual tours available?"
    );
}
