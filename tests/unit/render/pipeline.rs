use super::*;
use crate::{
    foundation::error::QuoteError,
    markup::builder::{POSTAMBLE, PREAMBLE},
    message::model::User,
    test_support::{BlockText, MapAvatars},
};

fn chris() -> User {
    User {
        id: 136958297,
        name: "Chris".to_string(),
        avatar: "/nowhere/chris.png".to_string(),
        ..User::default()
    }
}

fn request(message: Message) -> QuoteRequest {
    QuoteRequest {
        background_color: Rgb::from_packed(0x243447),
        width: 512,
        scale: 2,
        message: Some(message),
    }
}

#[test]
fn bot_command_card() {
    let message = Message::new(chris(), "/addsticker2").with_entities(vec![Entity {
        style: Style::BotCommand,
        offset: 0,
        length: 12,
    }]);
    let req = request(message);
    let mut text = BlockText::default();
    let out = generate(&req, &mut text, &MapAvatars::default()).unwrap();

    assert_eq!(text.calls.len(), 3);
    let name = &text.calls[0];
    assert_eq!(name.markup, format!("{PREAMBLE}<b>Chris</b>{POSTAMBLE}"));
    assert_eq!(name.font_size_px, 44.0);
    assert_eq!(name.max_width_px, 1024.0);
    assert!(name.is_name);
    assert_eq!(name.ink, name_color(136958297, req.background_color));

    let body = &text.calls[1];
    assert_eq!(
        body.markup,
        format!("{PREAMBLE}<a href='about:blank'>/addsticker2</a>{POSTAMBLE}")
    );
    assert_eq!(body.font_size_px, 48.0);
    assert_eq!(body.ink, Rgb::WHITE);
    assert!(!body.is_name);

    // Letter avatar fallback.
    assert_eq!(text.calls[2].font_size_px, 200.0);

    assert_eq!((out.width(), out.height()), (488, 162));
    assert!(out.pixel(50, 20).unwrap()[3] > 250);
    assert_eq!(out.pixel(150, 40), Some(name.ink.to_premul()));
    assert_eq!(out.pixel(300, 100), Some([255, 255, 255, 255]));
}

#[test]
fn reply_block_is_rendered_after_the_avatar() {
    let reply = Message::new(
        User {
            id: 5,
            name: "Bob".to_string(),
            ..User::default()
        },
        "hi",
    );
    let req = request(Message::new(chris(), "hello").with_reply(reply));
    let mut text = BlockText::default();
    generate(&req, &mut text, &MapAvatars::default()).unwrap();

    assert_eq!(text.calls.len(), 5);
    let reply_name = &text.calls[3];
    assert_eq!(reply_name.markup, format!("{PREAMBLE}<b>Bob</b>{POSTAMBLE}"));
    assert_eq!(reply_name.font_size_px, 32.0);
    assert_eq!(reply_name.offset, (0.0, 32.0));
    assert_eq!(reply_name.ink, name_color(5, req.background_color));
    assert!(reply_name.is_name);

    let reply_text = &text.calls[4];
    assert_eq!(reply_text.font_size_px, 42.0);
    assert_eq!(reply_text.offset, (0.0, 42.0));
    assert_eq!(reply_text.max_width_px, 922.0);
    assert!(!reply_text.is_name);
}

#[test]
fn reply_without_text_is_skipped() {
    let reply = Message::new(
        User {
            name: "Bob".to_string(),
            ..User::default()
        },
        "",
    );
    let req = request(Message::new(chris(), "hello").with_reply(reply));
    let mut text = BlockText::default();
    generate(&req, &mut text, &MapAvatars::default()).unwrap();
    assert_eq!(text.calls.len(), 3);
}

#[test]
fn nameless_sender_skips_the_name() {
    let user = User {
        id: 1,
        first_name: "Ada".to_string(),
        ..User::default()
    };
    let req = request(Message::new(user, "body"));
    let mut text = BlockText::default();
    generate(&req, &mut text, &MapAvatars::default()).unwrap();

    assert_eq!(text.calls.len(), 2);
    assert!(!text.calls[0].is_name);
    assert_eq!(text.calls[0].font_size_px, 48.0);
}

#[test]
fn loaded_avatar_skips_the_letter_fallback() {
    let avatars =
        MapAvatars::default().with("/nowhere/chris.png", Bitmap::filled(8, 8, [0, 0, 255, 255]));
    let req = request(Message::new(chris(), "hey"));
    let mut text = BlockText::default();
    generate(&req, &mut text, &avatars).unwrap();
    assert_eq!(text.calls.len(), 2);
}

#[test]
fn invalid_requests_fail() {
    let mut text = BlockText::default();
    let avatars = MapAvatars::default();

    let missing = QuoteRequest::default();
    assert!(matches!(
        generate(&missing, &mut text, &avatars),
        Err(QuoteError::Validation(_))
    ));

    let nested = Message::new(chris(), "a")
        .with_reply(Message::new(chris(), "b").with_reply(Message::new(chris(), "c")));
    assert!(matches!(
        generate(&request(nested), &mut text, &avatars),
        Err(QuoteError::Validation(_))
    ));
    assert!(text.calls.is_empty());
}

#[test]
fn options_apply_defaults_and_clamp_scale() {
    let mut req = QuoteRequest::default();
    assert_eq!(RenderOptions::from_request(&req), RenderOptions::default());

    req.width = 300;
    req.scale = -4;
    assert_eq!(
        RenderOptions::from_request(&req),
        RenderOptions {
            width: 300,
            scale: DEFAULT_SCALE
        }
    );

    req.scale = 50;
    let opts = RenderOptions::from_request(&req);
    assert_eq!(opts.scale, MAX_SCALE);
    assert_eq!(opts.scaled_width(), 6000);
}

#[test]
fn very_long_body_renders_past_u16_height() {
    let req = request(Message::new(chris(), "x\n".repeat(1500)));
    let mut text = BlockText::default();
    let out = generate(&req, &mut text, &MapAvatars::default()).unwrap();

    // 1501 body lines at 48px plus the name block, less the 22px bottom trim.
    assert_eq!(out.height(), 72162);
    assert!(out.height() > u32::from(u16::MAX));
    assert_eq!(
        out.pixel(200, 72100),
        Some(req.background_color.to_premul())
    );
    assert_eq!(out.pixel(150, 72000), Some([255, 255, 255, 255]));
}
