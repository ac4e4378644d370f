//! The translator: walks a design and assembles the command stream.

use toolpath::{
    first_point, Buildplate, Extruder, ExtrusionGeometry, Fan, Hotend, ManualGcode, Point,
    Printer, PrinterCommand, StationaryExtrusion, Step, TravelFormat,
};

use crate::error::{GcodeError, Result};
use crate::format;
use crate::primer;
use crate::settings::Settings;
use crate::state::MachineState;

/// Translates one design into one command stream.
///
/// A generator owns its [`MachineState`] for the duration of a single run;
/// `generate` consumes the generator, so state can never leak across runs.
/// Processing is strictly sequential: each step observes the cumulative
/// effect of all its predecessors.
#[derive(Debug)]
pub struct GcodeGenerator {
    settings: Settings,
    state: MachineState,
    lines: Vec<String>,
}

impl GcodeGenerator {
    /// Build a generator from an effective configuration.
    pub fn new(settings: Settings) -> Self {
        let state = MachineState::new(&settings);
        Self {
            settings,
            state,
            lines: Vec::new(),
        }
    }

    /// Translate `steps` into the full command stream.
    ///
    /// Three strictly ordered phases, none revisited: the device preamble,
    /// the body (priming steps if configured, then the caller's steps), and
    /// the device postamble spliced in as trailing raw-text steps. A step
    /// failing a state precondition aborts the run; partial output is
    /// discarded with the generator.
    pub fn generate(mut self, steps: &[Step]) -> Result<String> {
        for line in self.settings.start_gcode.lines() {
            let line = line.trim();
            if !line.is_empty() {
                self.lines.push(line.to_string());
            }
        }

        // Starting position: the first fully-defined move in the design, or
        // a synthesized origin when there is none.
        let (start, synthesized) = match first_point(steps, true) {
            Some(p) => (p.clone(), false),
            None => (Point::new(0.0, 0.0, 0.0), true),
        };

        let mut body: Vec<Step> = Vec::with_capacity(steps.len() + 8);
        if let Some(name) = self.settings.primer.clone() {
            body.extend(primer::routine(&name, &start)?);
        }
        if synthesized {
            log::warn!("design has no fully-defined point; starting at the origin");
            body.push(Step::Move(start));
        }
        body.extend_from_slice(steps);
        for line in self.settings.end_gcode.lines() {
            let line = line.trim();
            if !line.is_empty() {
                body.push(ManualGcode::new(line).into());
            }
        }

        for step in &body {
            self.render(step)?;
        }
        log::debug!(
            "translated {} steps into {} command lines",
            body.len(),
            self.lines.len()
        );
        Ok(self.lines.join("\n"))
    }

    /// One exhaustive dispatch: every instruction variant has exactly one
    /// render path.
    fn render(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Move(p) => self.render_move(p)?,
            Step::Printer(p) => self.render_printer(p),
            Step::Extruder(e) => self.render_extruder(e),
            Step::ExtrusionGeometry(g) => self.render_geometry(g),
            Step::StationaryExtrusion(s) => self.render_stationary(s),
            Step::Fan(f) => self.render_fan(f),
            Step::Hotend(h) => self.render_hotend(h),
            Step::Buildplate(b) => self.render_buildplate(b),
            Step::PrinterCommand(c) => self.render_command(c)?,
            Step::Raw(m) => self.render_raw(m),
            Step::Comment(c) => self.lines.push(format!("; {}", c.text)),
        }
        Ok(())
    }

    fn render_move(&mut self, target: &Point) -> Result<()> {
        // A raw override bypasses computed rendering entirely: only the
        // position is updated, no feed or extrusion bookkeeping advances.
        if let Some(raw) = &target.raw {
            self.lines.push(raw.clone());
            self.state.position.inherit_axes(target);
            return Ok(());
        }

        let explicit_e = target.e.filter(|e| *e > 0.0);
        let extruding = explicit_e.is_some() || self.state.extruder.on;

        // Axis tokens, fixed X/Y/Z order, only for axes that change.
        let mut axes = String::new();
        for (label, value, current) in [
            ('X', target.x, self.state.position.x),
            ('Y', target.y, self.state.position.y),
            ('Z', target.z, self.state.position.z),
        ] {
            if let Some(v) = value {
                if current != Some(v) {
                    axes.push(' ');
                    axes.push(label);
                    axes.push_str(&format::axis(v));
                }
            }
        }

        // No axis change and no extrusion due: emit nothing.
        if axes.is_empty() && explicit_e.is_none() {
            self.state.position.inherit_axes(target);
            return Ok(());
        }

        let e_token = if extruding {
            let volume = match explicit_e {
                Some(e) => e / self.state.extruder.volume_to_e,
                None => {
                    let area = self.state.geometry.area.ok_or(GcodeError::AreaNotSet)?;
                    self.state.position.distance_forgiving(target) * area
                }
            };
            let amount =
                self.state.extruder.consume_volume(volume) * self.state.extruder.volume_to_e;
            Some(format!(" E{}", format::e_value(amount)))
        } else if self.state.extruder.travel_format == TravelFormat::G1E0 {
            let amount =
                self.state.extruder.consume_volume(0.0) * self.state.extruder.volume_to_e;
            Some(format!(" E{}", format::e_value(amount)))
        } else {
            None
        };

        let verb = if extruding || self.state.extruder.travel_format == TravelFormat::G1E0 {
            "G1"
        } else {
            "G0"
        };
        let feed = if extruding {
            self.state.printer.print_speed
        } else {
            self.state.printer.travel_speed
        };

        let mut line = String::from(verb);
        line.push_str(&axes);
        if self.state.printer.last_feed != Some(feed) {
            line.push_str(" F");
            line.push_str(&format::feed(feed));
            self.state.printer.last_feed = Some(feed);
        }
        if let Some(e) = e_token {
            line.push_str(&e);
        }
        self.lines.push(line);
        self.state.position.inherit_axes(target);
        Ok(())
    }

    fn render_printer(&mut self, setting: &Printer) {
        if let Some(speed) = setting.print_speed {
            self.state.printer.print_speed = speed;
        }
        if let Some(speed) = setting.travel_speed {
            self.state.printer.travel_speed = speed;
        }
        if let Some(commands) = &setting.new_command {
            for (id, command) in commands {
                self.state
                    .printer
                    .command_list
                    .insert(id.clone(), command.clone());
            }
        }
        // No feed line here: feed selection depends on whether the next move
        // extrudes, so emission is deferred to that move.
    }

    fn render_extruder(&mut self, setting: &Extruder) {
        if let Some(units) = setting.units {
            self.state.extruder.units = units;
        }
        if let Some(dia) = setting.dia_feed {
            self.state.extruder.dia_feed = dia;
        }
        if setting.units.is_some() || setting.dia_feed.is_some() {
            self.state.extruder.update_ratio();
        }
        if let Some(retraction) = setting.retraction {
            self.state.extruder.retraction = retraction;
        }
        if let Some(travel_format) = setting.travel_format {
            self.state.extruder.travel_format = travel_format;
        }

        if let Some(on) = setting.on {
            let prev_on = self.state.extruder.on;
            self.state.extruder.on = on;
            if !on && prev_on && self.state.extruder.retraction > 0.0 {
                let distance = self.state.extruder.retraction;
                self.state.extruder.pending_restore = Some(distance);
                self.lines
                    .push(format!("G1 E-{}", format::e_value(distance)));
            } else if on && !prev_on {
                if let Some(distance) = self.state.extruder.pending_restore.take() {
                    self.lines.push(format!("G1 E{}", format::e_value(distance)));
                }
            }
        }

        if let Some(relative) = setting.relative_gcode {
            self.state.extruder.relative = relative;
            // The reference always restarts at the running total on a mode
            // switch, so absolute output counts from the reset point.
            self.state.extruder.total_volume_ref = self.state.extruder.total_volume;
            if relative {
                self.lines.push("M83 ; relative extrusion".to_string());
            } else {
                self.lines.push("M82 ; absolute extrusion".to_string());
                self.lines
                    .push("G92 E0 ; reset extrusion position to zero".to_string());
            }
        }
    }

    fn render_geometry(&mut self, setting: &ExtrusionGeometry) {
        self.state.geometry.apply(setting);
        if setting.area_model.is_some()
            || setting.width.is_some()
            || setting.height.is_some()
            || setting.diameter.is_some()
        {
            self.state.geometry.update_area();
        }
    }

    fn render_stationary(&mut self, extrusion: &StationaryExtrusion) {
        let amount = self.state.extruder.consume_volume(extrusion.volume)
            * self.state.extruder.volume_to_e;
        self.lines.push(format!(
            "G1 F{} E{}",
            format::feed(extrusion.speed),
            format::e_value(amount)
        ));
        self.state.printer.last_feed = Some(extrusion.speed);
    }

    fn render_fan(&mut self, fan: &Fan) {
        let pwm = (fan.speed_percent * 255.0 / 100.0).round() as u32;
        self.lines.push(format!("M106 S{pwm} ; set fan speed"));
    }

    fn render_hotend(&mut self, hotend: &Hotend) {
        let (command, action) = if hotend.wait {
            ("M109", "wait")
        } else {
            ("M104", "continue")
        };
        let line = match hotend.tool {
            Some(tool) => format!(
                "{command} S{} T{tool} ; set hotend temp for tool {tool} and {action}",
                hotend.temp
            ),
            None => format!("{command} S{} ; set hotend temp and {action}", hotend.temp),
        };
        self.lines.push(line);
    }

    fn render_buildplate(&mut self, buildplate: &Buildplate) {
        let command = if buildplate.wait { "M190" } else { "M140" };
        let action = if buildplate.wait { "wait" } else { "continue" };
        self.lines
            .push(format!("{command} S{} ; set bed temp and {action}", buildplate.temp));
    }

    fn render_command(&mut self, command: &PrinterCommand) -> Result<()> {
        let line = self
            .state
            .printer
            .command_list
            .get(&command.id)
            .ok_or_else(|| GcodeError::UnknownCommand(command.id.clone()))?;
        self.lines.push(line.clone());
        Ok(())
    }

    fn render_raw(&mut self, manual: &ManualGcode) {
        for line in manual.text.lines() {
            self.lines.push(line.to_string());
        }
    }
}
