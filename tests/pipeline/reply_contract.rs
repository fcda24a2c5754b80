use thoughtdesk::parse_reply;

#[test]
fn plain_prose_is_all_reply_text() {
    let parsed = parse_reply("Here's the plan.");
    assert_eq!(parsed.reply_text, "Here's the plan.");
    assert!(parsed.structured.is_none());
}

#[test]
fn trailing_payload_is_split_from_reply() {
    let parsed = parse_reply(
        "Done.\n```json\n{\"actions\":[{\"type\":\"task\",\"title\":\"Review report\",\"description\":\"by Friday\"}]}\n```",
    );
    assert_eq!(parsed.reply_text, "Done.");
    assert_eq!(
        parsed.structured.unwrap().actions()[0].title,
        "Review report"
    );
}

#[test]
fn only_the_last_block_populates_structured() {
    let parsed = parse_reply(
        "Format looks like ```json\n{\"actions\":[{\"type\":\"email\",\"title\":\"Sample\",\"description\":\"\"}]}\n``` and here it is:\n```json\n{\"agendaItems\":[{\"time\":\"9:00 AM\",\"title\":\"Standup\",\"type\":\"call\",\"duration\":\"15 min\"}]}\n```",
    );
    let structured = parsed.structured.unwrap();
    assert!(structured.actions.is_none());
    assert_eq!(structured.agenda_items()[0].title, "Standup");
}

#[test]
fn invalid_payload_is_dropped_from_reply() {
    let parsed = parse_reply("On it.\n```json\n{actions: [oops]}\n```");
    assert_eq!(parsed.reply_text, "On it.");
    assert!(parsed.structured.is_none());
}

#[test]
fn reparsing_reply_text_is_stable() {
    let first = parse_reply("All set.\n```json\n{\"actions\":[]}\n```");
    let second = parse_reply(&first.reply_text);
    assert_eq!(second.reply_text, first.reply_text);
    assert!(second.structured.is_none());
}
