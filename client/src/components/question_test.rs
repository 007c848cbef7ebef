use super::*;

#[test]
fn option_id_combines_field_key_and_value() {
    assert_eq!(option_id(Field::VoiceChat, "listen-only"), "voiceChat-listen-only");
    assert_eq!(option_id(Field::BotExperience, "3"), "botExperience-3");
}

#[test]
fn group_class_switches_to_scale_layout() {
    assert_eq!(group_class(true), "radio-group radio-group--scale");
    assert_eq!(group_class(false), "radio-group");
}
