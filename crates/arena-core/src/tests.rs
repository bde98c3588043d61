#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::DVec2;

    use crate::commands::{ClientCommand, ControlUpdate, SessionError};
    use crate::components::{ControlState, EntityId, Health};
    use crate::config::{ArenaConfig, ConfigError};
    use crate::enums::*;
    use crate::state::*;
    use crate::types::*;

    #[test]
    fn test_entity_kind_serde_names() {
        let json = serde_json::to_string(&EntityKind::PlayerDead).unwrap();
        assert_eq!(json, "\"player-dead\"");
        let back: EntityKind = serde_json::from_str("\"asteroid\"").unwrap();
        assert_eq!(back, EntityKind::Asteroid);
    }

    #[test]
    fn test_entity_kind_indices_are_dense() {
        for (i, kind) in EntityKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_default_transmit_mask() {
        let mask = TransmitMask::default();
        assert!(mask.contains(Field::Id));
        assert!(mask.contains(Field::Health));
        assert!(!mask.contains(Field::Name));
        assert!(!mask.contains(Field::DespawnTime));
        assert!(!mask.contains(Field::Owner));
        assert_eq!(mask.fields().count(), 10);
    }

    #[test]
    fn test_bullet_mask_hides_health() {
        let mask = TransmitMask::bullet();
        assert!(mask.contains(Field::DespawnTime));
        assert!(mask.contains(Field::Owner));
        assert!(!mask.contains(Field::Health));
        assert!(!mask.contains(Field::MaxHealth));
        assert!(TransmitMask::player().contains(Field::Name));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("vis"), Ok(Role::Observer));
        assert_eq!(Role::parse("control"), Ok(Role::Controller));
        assert_eq!(
            Role::parse("spectator"),
            Err(SessionError::UnknownRole("spectator".into()))
        );
    }

    #[test]
    fn test_wrap_handles_negative_and_overflow() {
        let bounds = Bounds::new(800.0, 400.0);
        let wrapped = bounds.wrap(DVec2::new(-10.0, 410.0));
        assert_relative_eq!(wrapped.x, 790.0);
        assert_relative_eq!(wrapped.y, 10.0);

        let far = bounds.wrap(DVec2::new(-1610.0, 1200.0));
        assert!(bounds.contains(far));
        assert_relative_eq!(far.x, 790.0);
        assert_relative_eq!(far.y, 0.0);

        let tiny = bounds.wrap(DVec2::new(-1e-18, 0.0));
        assert!(bounds.contains(tiny), "got {tiny:?}");
    }

    #[test]
    fn test_heading_helpers() {
        let unit = heading_to_unit(90.0);
        assert_relative_eq!(unit.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(unit.y, 1.0);
        assert_relative_eq!(heading_of(DVec2::new(-1.0, 0.0)), 180.0);
        assert_relative_eq!(heading_of(DVec2::new(0.0, -2.0)), 270.0);
        assert_eq!(heading_of(DVec2::new(1.0, -1e-300)), 0.0);
    }

    #[test]
    fn test_health_flags() {
        assert!(Health::full(100).is_alive());
        let dead = Health { current: 0, max: 100 };
        assert!(dead.is_destroyed());
        let inert = Health { current: -5, max: 0 };
        assert!(!inert.is_destroyed());
    }

    #[test]
    fn test_control_update_accepts_numbers_and_ignores_unknown_keys() {
        let update: ControlUpdate =
            serde_json::from_str(r#"{"up": 1, "shoot": true, "jump": 1, "left": 0}"#).unwrap();
        assert_eq!(update.up, Some(true));
        assert_eq!(update.shoot, Some(true));
        assert_eq!(update.left, Some(false));
        assert_eq!(update.right, None);

        let mut state = ControlState {
            right: true,
            left: true,
            ..Default::default()
        };
        update.apply_to(&mut state);
        assert!(state.up);
        assert!(state.shoot);
        assert!(!state.left);
        assert!(state.right, "absent flags are left untouched");
    }

    #[test]
    fn test_control_update_skips_flags_of_other_types() {
        let update: ControlUpdate = serde_json::from_str(
            r#"{"up": 1, "shoot": "yes", "down": [1], "right": null, "left": true}"#,
        )
        .unwrap();
        assert_eq!(update.up, Some(true));
        assert_eq!(update.shoot, None);
        assert_eq!(update.down, None);
        assert_eq!(update.right, None);
        assert_eq!(update.left, Some(true));

        let mut state = ControlState {
            shoot: true,
            ..Default::default()
        };
        update.apply_to(&mut state);
        assert!(state.up);
        assert!(state.left);
        assert!(state.shoot, "a malformed flag keeps the held state");
    }

    #[test]
    fn test_client_command_serde() {
        let json = r#"{"type":"ControlState","client":3,"state":{"up":true}}"#;
        let cmd: ClientCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            ClientCommand::ControlState {
                client: ClientId(3),
                state: ControlUpdate {
                    up: Some(true),
                    ..Default::default()
                },
            }
        );
    }

    #[test]
    fn test_entity_view_omits_hidden_fields() {
        let view = EntityView {
            health: Some(90),
            ..EntityView::bare(EntityId(1))
        };
        let json = serde_json::to_string(&view).unwrap();
        assert_eq!(json, r#"{"id":1,"health":90}"#);
        assert!(EntityView::bare(EntityId(7)).is_bare());
        assert!(!view.is_bare());
    }

    #[test]
    fn test_server_message_tagging() {
        let msg = ServerMessage::Delta(WorldDelta {
            entities: vec![EntityView::bare(EntityId(2))],
        });
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"Delta","data":{"entities":[{"id":2}]}}"#);
    }

    #[test]
    fn test_config_defaults_match_constants() {
        let config = ArenaConfig::default();
        assert_eq!(config.arena.x_max, 800.0);
        assert_eq!(config.player.max_health, 100);
        assert_eq!(config.asteroid.max_count, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_partial_toml_override() {
        let config = ArenaConfig::from_toml_str(
            r#"
            [arena]
            x_max = 1024.0

            [asteroid]
            max_count = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.arena.x_max, 1024.0);
        assert_eq!(config.arena.y_max, 400.0);
        assert_eq!(config.asteroid.max_count, 3);
        assert_eq!(config.bullet.damage, 20);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let err = ArenaConfig::from_toml_str("[arena]\ntick_rate = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ArenaConfig::from_toml_str("[arena]\nx_max = \"wide\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = ArenaConfig::load_from_file("arena.ron").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
