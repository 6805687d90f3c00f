use crate::{markdown::elements::Slide, presenter::PresentationError};

/// A parsed presentation along with the slide currently being shown.
#[derive(Debug)]
pub(crate) struct Presentation {
    slides: Vec<Slide>,
    current_slide_index: usize,
}

impl Presentation {
    /// Construct a presentation, which must contain at least one slide.
    pub(crate) fn new(slides: Vec<Slide>) -> Result<Self, PresentationError> {
        if slides.is_empty() {
            return Err(PresentationError::EmptyPresentation);
        }
        Ok(Self { slides, current_slide_index: 0 })
    }

    pub(crate) fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub(crate) fn current_slide(&self) -> &Slide {
        &self.slides[self.current_slide_index]
    }

    pub(crate) fn current_slide_index(&self) -> usize {
        self.current_slide_index
    }

    pub(crate) fn jump_next_slide(&mut self) -> bool {
        if self.current_slide_index < self.slides.len() - 1 {
            self.current_slide_index += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn jump_previous_slide(&mut self) -> bool {
        if self.current_slide_index > 0 {
            self.current_slide_index -= 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn jump_first_slide(&mut self) -> bool {
        if self.current_slide_index != 0 {
            self.current_slide_index = 0;
            true
        } else {
            false
        }
    }

    pub(crate) fn jump_last_slide(&mut self) -> bool {
        let last_slide_index = self.slides.len() - 1;
        if self.current_slide_index != last_slide_index {
            self.current_slide_index = last_slide_index;
            true
        } else {
            false
        }
    }

    pub(crate) fn jump_slide(&mut self, slide_index: usize) -> bool {
        if slide_index < self.slides.len() && slide_index != self.current_slide_index {
            self.current_slide_index = slide_index;
            true
        } else {
            false
        }
    }

    /// Replace the slides in this presentation, staying on the same slide if it still exists.
    pub(crate) fn replace_slides(&mut self, slides: Vec<Slide>) -> Result<(), PresentationError> {
        if slides.is_empty() {
            return Err(PresentationError::EmptyPresentation);
        }
        self.current_slide_index = self.current_slide_index.min(slides.len() - 1);
        self.slides = slides;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[derive(Clone)]
    enum Jump {
        First,
        Last,
        Next,
        Previous,
        Specific(usize),
    }

    impl Jump {
        fn apply(&self, presentation: &mut Presentation) -> bool {
            use Jump::*;
            match self {
                First => presentation.jump_first_slide(),
                Last => presentation.jump_last_slide(),
                Next => presentation.jump_next_slide(),
                Previous => presentation.jump_previous_slide(),
                Specific(index) => presentation.jump_slide(*index),
            }
        }
    }

    fn slides(count: usize) -> Vec<Slide> {
        (0..count).map(|i| Slide { title: format!("slide {i}"), ..Default::default() }).collect()
    }

    #[test]
    fn empty_presentation() {
        assert!(matches!(Presentation::new(vec![]), Err(PresentationError::EmptyPresentation)));
    }

    #[rstest]
    #[case::previous_from_first(0, &[Jump::Previous], 0, false)]
    #[case::next_from_first(0, &[Jump::Next], 1, true)]
    #[case::next_from_last(2, &[Jump::Next], 2, false)]
    #[case::first_from_last(2, &[Jump::First], 0, true)]
    #[case::first_from_first(0, &[Jump::First], 0, false)]
    #[case::last_from_first(0, &[Jump::Last], 2, true)]
    #[case::specific(0, &[Jump::Specific(1)], 1, true)]
    #[case::specific_out_of_bounds(0, &[Jump::Specific(3)], 0, false)]
    #[case::back_and_forth(1, &[Jump::Next, Jump::Previous], 1, true)]
    fn jumping(
        #[case] from: usize,
        #[case] jumps: &[Jump],
        #[case] expected_index: usize,
        #[case] expected_last_result: bool,
    ) {
        let mut presentation = Presentation::new(slides(3)).expect("empty presentation");
        presentation.jump_slide(from);

        let mut last = false;
        for jump in jumps {
            last = jump.apply(&mut presentation);
        }
        assert_eq!(presentation.current_slide_index(), expected_index);
        assert_eq!(presentation.current_slide().title, format!("slide {expected_index}"));
        assert_eq!(last, expected_last_result);
    }

    #[test]
    fn replace_slides() {
        let mut presentation = Presentation::new(slides(3)).expect("empty presentation");
        presentation.jump_last_slide();
        presentation.replace_slides(slides(2)).expect("replace failed");
        assert_eq!(presentation.current_slide_index(), 1);
        assert!(presentation.replace_slides(vec![]).is_err());
        assert_eq!(presentation.slides().len(), 2);
    }
}
