use crate::engines::generation::lsystem::{CLOSE_BRACKET, OPEN_BRACKET};
use crate::types::{BranchSegment, Point2};

/// Turtle tuning: branch angle per `+`/`-` and forward step length.
#[derive(Debug, Clone, Copy)]
pub struct TurtleConfig {
    pub angle_degrees: f64,
    pub step: f64,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            angle_degrees: 25.0,
            step: 2.0,
        }
    }
}

impl TurtleConfig {
    pub fn with_angle(mut self, angle_degrees: f64) -> Self {
        self.angle_degrees = angle_degrees;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct TurtleState {
    position: Point2,
    heading_degrees: f64,
}

/// 2D drawing cursor interpreting a genome sentence. Forward symbols
/// (`F`/`G`/`H`) move one step and report the segment through the draw
/// callback; `+`/`-` turn; `[`/`]` push and pop the pose.
///
/// This is the crate's side of the renderer boundary: a real renderer
/// supplies its own draw callback, the built-in [`interpret`] collects the
/// segments for fitness scoring and export.
pub struct Turtle<F>
where
    F: FnMut(Point2, Point2),
{
    state: TurtleState,
    stack: Vec<TurtleState>,
    /// Pose restored by a pop on an empty stack; tracks the most recent push.
    last_pushed: TurtleState,
    draw: F,
}

impl<F> Turtle<F>
where
    F: FnMut(Point2, Point2),
{
    pub fn new(start: Point2, draw: F) -> Self {
        let state = TurtleState {
            position: start,
            heading_degrees: 0.0,
        };
        Self {
            state,
            stack: Vec::new(),
            last_pushed: state,
            draw,
        }
    }

    /// Walk the sentence, dispatching each recognized symbol. Unknown
    /// symbols are ignored, matching total rewriting: a genome may carry
    /// symbols the turtle has no command for.
    pub fn run(&mut self, sentence: &str, config: &TurtleConfig) {
        for symbol in sentence.chars() {
            match symbol {
                'F' | 'G' | 'H' => self.forward(config.step),
                '+' => self.turn(config.angle_degrees),
                '-' => self.turn(-config.angle_degrees),
                OPEN_BRACKET => self.push(),
                CLOSE_BRACKET => self.pop(),
                _ => {}
            }
        }
    }

    /// Heading 0 points straight up; positive angles lean left.
    fn forward(&mut self, step: f64) {
        let radians = self.state.heading_degrees.to_radians();
        let start = self.state.position;
        let end = Point2::new(start.x - step * radians.sin(), start.y + step * radians.cos());

        (self.draw)(start, end);
        self.state.position = end;
    }

    fn turn(&mut self, delta_degrees: f64) {
        self.state.heading_degrees += delta_degrees;
    }

    fn push(&mut self) {
        self.stack.push(self.state);
        self.last_pushed = self.state;
    }

    /// Pop on an empty stack restores the most recently pushed pose instead
    /// of failing, so sentences with surplus closers still traverse.
    fn pop(&mut self) {
        self.state = self.stack.pop().unwrap_or(self.last_pushed);
    }
}

/// Interpret a sentence and collect every drawn segment, in draw order.
pub fn interpret(sentence: &str, config: &TurtleConfig) -> Vec<BranchSegment> {
    let mut segments = Vec::new();

    {
        let mut turtle = Turtle::new(Point2::ORIGIN, |start, end| {
            segments.push(BranchSegment::new(start, end));
        });
        turtle.run(sentence, config);
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upright_config() -> TurtleConfig {
        TurtleConfig::default().with_angle(90.0).with_step(1.0)
    }

    #[test]
    fn forward_moves_straight_up() {
        let segments = interpret("FF", &upright_config());
        assert_eq!(segments.len(), 2);
        assert!((segments[1].end.y - 2.0).abs() < 1e-9);
        assert!(segments[1].end.x.abs() < 1e-9);
    }

    #[test]
    fn push_pop_restores_pose() {
        let segments = interpret("F[+F]F", &upright_config());
        assert_eq!(segments.len(), 3);
        // Third segment continues from the pre-branch position.
        assert!((segments[2].start.y - 1.0).abs() < 1e-9);
        assert!(segments[2].start.x.abs() < 1e-9);
        assert!((segments[2].end.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn plus_turns_left() {
        let segments = interpret("+F", &upright_config());
        assert_eq!(segments.len(), 1);
        assert!((segments[0].end.x + 1.0).abs() < 1e-9);
        assert!(segments[0].end.y.abs() < 1e-9);
    }

    #[test]
    fn surplus_closers_fall_back_to_last_push() {
        let segments = interpret("[F]]F", &upright_config());
        // Second F re-runs from the pushed origin pose.
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].start, segments[0].start);
    }

    #[test]
    fn unknown_symbols_are_skipped() {
        let segments = interpret("XFY", &upright_config());
        assert_eq!(segments.len(), 1);
    }
}
