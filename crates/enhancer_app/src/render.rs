use enhancer_core::{PaneView, UiViewModel};

use crate::bindings::{Slot, UiCommand};

/// Full render of the view; the bindings apply commands in order.
#[allow(clippy::vec_init_then_push)]
pub fn render(view: &UiViewModel) -> Vec<UiCommand> {
    let mut cmds = Vec::new();

    cmds.push(UiCommand::SetText {
        slot: Slot::FileName,
        text: view.file_name.clone(),
    });
    cmds.push(UiCommand::SetEnabled {
        slot: Slot::EnhanceButton,
        enabled: view.submit_enabled,
    });
    cmds.push(pane_command(Slot::OriginalBox, &view.original));
    cmds.push(pane_command(Slot::EnhancedBox, &view.result));
    cmds.push(UiCommand::SetVisible {
        slot: Slot::Spinner,
        visible: view.spinner_visible,
    });
    // Status is applied last.
    cmds.push(UiCommand::SetText {
        slot: Slot::Log,
        text: view.status.clone(),
    });

    cmds
}

fn pane_command(slot: Slot, pane: &PaneView) -> UiCommand {
    match pane {
        PaneView::Placeholder { text } => UiCommand::ShowPlaceholder {
            slot,
            text: text.clone(),
        },
        PaneView::Image { src, alt } => UiCommand::ShowImage {
            slot,
            src: src.clone(),
            alt: alt.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use enhancer_core::UiState;

    use super::*;

    #[test]
    fn initial_render_touches_every_output_slot() {
        let cmds = render(&UiState::new().view());
        let slots: Vec<Slot> = cmds.iter().map(UiCommand::slot).collect();
        assert_eq!(
            slots,
            vec![
                Slot::FileName,
                Slot::EnhanceButton,
                Slot::OriginalBox,
                Slot::EnhancedBox,
                Slot::Spinner,
                Slot::Log,
            ]
        );
        assert!(cmds.contains(&UiCommand::SetEnabled {
            slot: Slot::EnhanceButton,
            enabled: false
        }));
        assert!(cmds.contains(&UiCommand::SetVisible {
            slot: Slot::Spinner,
            visible: false
        }));
    }
}
