use jamboree_cards::{CardBudget, format_gig_date, join_for_display, truncate_to};
use jamboree_schema::{AdminActions, AttendeeView, GigCardView};

use super::image::ImageSource;
use super::read_model::ReadModel;
use super::{Viewer, profile_path};
use crate::attendance::ButtonState;
use crate::config::CardsConfig;
use crate::db::DbGig;

pub fn gig_card(
    model: &ReadModel,
    gig: &DbGig,
    viewer: Viewer<'_>,
    button: ButtonState,
    cards: &CardsConfig,
) -> GigCardView {
    let attendees = model.attendees_of(gig.id);
    let more_attendees = attendees.len().saturating_sub(CardBudget::ATTENDEES);
    let attendees = attendees
        .into_iter()
        .take(CardBudget::ATTENDEES)
        .map(|artist| AttendeeView {
            id: artist.id,
            first_name: artist.first_name.clone(),
            profile_path: profile_path(&artist.email),
        })
        .collect();

    let date = format_gig_date(&gig.date.with_timezone(&cards.display_offset()));

    GigCardView {
        id: gig.id,
        title: gig.title.clone(),
        image: ImageSource::new(gig.image.as_deref(), &cards.gig_placeholder).to_view(),
        attendees,
        more_attendees,
        date,
        skill_level: gig.skill_level.clone(),
        genres: truncate_to(&join_for_display(&gig.genres), CardBudget::GENRES).into_owned(),
        instruments: truncate_to(&join_for_display(&gig.instruments), CardBudget::INSTRUMENTS)
            .into_owned(),
        venue: truncate_to(&gig.venue, CardBudget::VENUE).into_owned(),
        about: truncate_to(&gig.about, CardBudget::ABOUT).into_owned(),
        admin_actions: viewer.is_admin.then(|| AdminActions {
            delete: Some(format!("/api/gigs/{}", gig.id)),
        }),
        join_button: button.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendance::Membership;
    use crate::db::Collections;
    use crate::views::read_model::fixtures::{artist, gig, membership};

    fn model_with_attendees(count: i64) -> ReadModel {
        let artists = (1..=count)
            .map(|id| {
                let email = format!("p{id}@example.com");
                artist(id, &email, &format!("P{id}"), &["Bass"], &["Jazz"])
            })
            .collect();
        let memberships = (1..=count).map(|id| membership(id, id, 5)).collect();
        ReadModel::from(Collections {
            artists,
            gigs: vec![gig(5, "Harbor Jam", 3, &["Jazz", "Funk"])],
            memberships,
        })
    }

    #[test]
    fn renders_fields_and_join_button() {
        let model = model_with_attendees(2);
        let card = gig_card(
            &model,
            &model.gigs[0],
            Viewer::anonymous(),
            ButtonState::steady(Membership::Absent),
            &CardsConfig::default(),
        );

        assert_eq!(card.title, "Harbor Jam");
        assert_eq!(card.date, "March 3rd 2025, 7:30 pm");
        assert_eq!(card.genres, "Jazz, Funk");
        assert_eq!(card.image.src, "/images/default_jamsession_image.png");
        assert_eq!(card.attendees.len(), 2);
        assert_eq!(card.attendees[0].profile_path, "/viewProfile/p1%40example.com");
        assert_eq!(card.more_attendees, 0);
        assert_eq!(card.join_button.label, "Join");
        assert_eq!(card.join_button.class, "joinButton");
        assert!(card.admin_actions.is_none());
    }

    #[test]
    fn attendee_list_is_capped() {
        let model = model_with_attendees(13);
        let card = gig_card(
            &model,
            &model.gigs[0],
            Viewer::anonymous(),
            ButtonState::steady(Membership::Absent),
            &CardsConfig::default(),
        );
        assert_eq!(card.attendees.len(), CardBudget::ATTENDEES);
        assert_eq!(card.more_attendees, 3);
    }

    #[test]
    fn admins_get_a_delete_action() {
        let model = model_with_attendees(0);
        let viewer = Viewer {
            email: Some("boss@example.com"),
            is_admin: true,
        };
        let card = gig_card(
            &model,
            &model.gigs[0],
            viewer,
            ButtonState::steady(Membership::Present),
            &CardsConfig::default(),
        );
        assert_eq!(
            card.admin_actions.and_then(|a| a.delete).as_deref(),
            Some("/api/gigs/5")
        );
        assert_eq!(card.join_button.label, "Leave");
    }

    #[test]
    fn long_about_is_cut_at_a_word_boundary() {
        let mut model = model_with_attendees(0);
        model.gigs[0].about = "groove ".repeat(60);
        let card = gig_card(
            &model,
            &model.gigs[0],
            Viewer::anonymous(),
            ButtonState::steady(Membership::Absent),
            &CardsConfig::default(),
        );
        assert!(card.about.ends_with("groove..."));
        assert!(card.about.chars().count() <= CardBudget::ABOUT + 3);
    }
}
