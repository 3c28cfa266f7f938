use ideaforge::config::Config;
use ideaforge::models::*;
use ideaforge::services::Services;
use ideaforge::wizard::*;
use speculate2::speculate;

fn offline_wizard(session: Session) -> Wizard {
    let services = Services::from_config(&Config::default()).expect("Failed to build services");
    Wizard::with_session(services, session)
}

speculate! {
    describe "session" {
        before {
            let mut session = Session::new();
        }

        it "starts empty" {
            assert!(session.user().is_none());
            assert!(session.idea_description().is_empty());
            assert!(session.selected_domain().is_none());
            assert!(session.current_idea_id().is_none());
            assert_eq!(session.documents(), &Documents::default());
            assert!(!session.is_premium());
        }

        it "updates one document without touching the others" {
            session.set_document(DocumentKind::Requirements, "r1");
            session.set_document(DocumentKind::Lifecycle, "l1");
            session.set_document(DocumentKind::Requirements, "r2");

            assert_eq!(session.document(DocumentKind::Requirements), "r2");
            assert_eq!(session.document(DocumentKind::Technical), "");
            assert_eq!(session.document(DocumentKind::Lifecycle), "l1");
        }

        it "replaces all documents at once" {
            session.set_document(DocumentKind::Technical, "stale");
            session.set_documents(Documents {
                requirements: "a".to_string(),
                technical: "b".to_string(),
                lifecycle: "c".to_string(),
            });

            let texts: Vec<_> = session.documents().iter().map(|(_, t)| t.to_string()).collect();
            assert_eq!(texts, vec!["a", "b", "c"]);
        }
    }

    describe "revision_request" {
        before {
            let mut request = RevisionRequest::new();
        }

        it "needs a selection and an instruction" {
            assert!(!request.can_regenerate());

            request.toggle(DocumentKind::Technical, true);
            assert!(!request.can_regenerate());

            request.set_instruction("   ");
            assert!(!request.can_regenerate());

            request.set_instruction("Add a security section");
            assert!(request.can_regenerate());

            request.toggle(DocumentKind::Technical, false);
            assert!(!request.can_regenerate());
        }

        it "keeps each kind once" {
            request.toggle(DocumentKind::Lifecycle, true);
            request.toggle(DocumentKind::Lifecycle, true);
            request.toggle(DocumentKind::Requirements, true);

            let selected: Vec<_> = request.selected().collect();
            assert_eq!(selected, vec![DocumentKind::Requirements, DocumentKind::Lifecycle]);
            assert!(request.is_selected(DocumentKind::Lifecycle));
            assert!(!request.is_selected(DocumentKind::Technical));
        }
    }

    describe "steps" {
        it "round trips every route" {
            for path in [
                "/", "/login", "/idea", "/documentation", "/generate-images",
                "/download", "/premium", "/success", "/website-generation",
                "/lead-generation", "/explore",
            ] {
                let step = Step::from_path(path).expect("Unknown route");
                assert_eq!(step.path(), path);
            }
        }

        it "rejects unknown routes" {
            assert!(Step::from_path("/checkout").is_none());
        }
    }

    describe "navigation" {
        before {
            let mut wizard = offline_wizard(Session::new());
        }

        it "starts on the splash screen" {
            assert_eq!(wizard.step(), Step::Splash);
            assert_eq!(wizard.history(), vec![Step::Splash]);
            assert!(wizard.inline_error().is_none());
        }

        it "refuses operations that belong to another step" {
            let err = wizard.continue_as_guest().unwrap_err();

            assert!(matches!(
                err,
                WizardError::WrongStep { expected: Step::Login, actual: Step::Splash }
            ));
            assert_eq!(wizard.history(), vec![Step::Splash]);
        }

        it "records every visited step in order" {
            wizard.open(Step::Login);
            wizard.continue_as_guest().unwrap();
            wizard.open(Step::Documentation);
            wizard.continue_to_images().unwrap();

            assert_eq!(
                wizard.history(),
                vec![
                    Step::Splash,
                    Step::Login,
                    Step::IdeaInput,
                    Step::Documentation,
                    Step::GenerateImages,
                ]
            );
        }

        it "cancels the page it leaves" {
            wizard.open(Step::Download);
            let token = wizard.page_cancel_handle();
            assert!(!token.is_cancelled());

            wizard.continue_to_premium().unwrap();

            assert!(token.is_cancelled());
            assert!(!wizard.page_cancel_handle().is_cancelled());
        }

        it "declining premium goes back to the previous page" {
            wizard.open(Step::Download);
            wizard.continue_to_premium().unwrap();

            let outcome = wizard.decline_premium().unwrap();

            assert_eq!(outcome, StepOutcome::Redirected(Step::Download));
            assert_eq!(wizard.step(), Step::Download);
            assert!(!wizard.session().is_premium());
        }

        it "premium features lead to explore" {
            wizard.open(Step::Premium);
            wizard.purchase_premium().unwrap();
            wizard.start_website_generation().unwrap();
            wizard.skip_to_explore().unwrap();

            assert!(wizard.session().is_premium());
            assert_eq!(wizard.step(), Step::Explore);
        }

        it "lead generation starts without an uploaded sheet" {
            wizard.open(Step::Success);
            wizard.start_lead_generation().unwrap();

            assert_eq!(wizard.step(), Step::LeadGeneration);
            assert!(!wizard.lead_sheet_uploaded());
        }
    }
}
