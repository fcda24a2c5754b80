use chrono::NaiveDate;
use thoughtdesk::parse_reply;
use thoughtdesk::records::{StoreActionType, drafts_from_output};
use thoughtdesk::structured::ActionStatus;

#[test]
fn reply_payload_becomes_store_drafts() {
    let parsed = parse_reply(concat!(
        "Booked and noted.\n```json\n",
        r#"{"actions":[{"type":"agenda","title":"Deep work","description":"Morning block","status":"scheduled"},"#,
        r#"{"type":"email","title":"Reply to Sam","description":"Re: contract"}],"#,
        r#""agendaItems":[{"time":"9:30 am","title":"Deep work","type":"focus","duration":""}]}"#,
        "\n```"
    ));
    let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let drafts = drafts_from_output(&parsed.structured.unwrap(), "voice", day);

    assert_eq!(drafts.actions.len(), 2);
    assert_eq!(drafts.actions[0].kind, StoreActionType::CalendarEvent);
    assert_eq!(drafts.actions[0].status, ActionStatus::Scheduled);
    assert_eq!(drafts.actions[1].kind, StoreActionType::Email);
    assert_eq!(drafts.actions[1].status, ActionStatus::Pending);

    let agenda = &drafts.agenda_items[0];
    assert_eq!(agenda.duration, "30 min");
    assert_eq!(agenda.date, day.and_hms_opt(9, 30, 0).unwrap());
}
