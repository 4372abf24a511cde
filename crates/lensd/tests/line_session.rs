//! End-to-end sessions over the line protocol.

use std::io::Cursor;

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use lens_config::Config;
use lensd::{INVALID_REQUEST, Service, StaticConfigLoader, bootstrap_with};

struct Session {
    _dir: TempDir,
    config: Config,
}

impl Session {
    fn start(&self) -> Service {
        bootstrap_with(&StaticConfigLoader::new(self.config.clone())).expect("bootstrap")
    }

    fn exchange(&self, service: &Service, input: &str) -> Vec<String> {
        let mut output = Vec::new();
        service
            .line_handler()
            .serve(Cursor::new(input.as_bytes().to_vec()), &mut output)
            .expect("serve");
        String::from_utf8(output)
            .expect("utf8 output")
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

#[fixture]
fn session() -> Session {
    let dir = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 path");
    let config = Config {
        preferences_path: Some(root.join("state").join("preferences.json")),
        ..Config::default()
    };
    Session { _dir: dir, config }
}

#[rstest]
fn settings_survive_a_restart(session: Session) {
    let set = concat!(
        r#"{"action":"set","settings":{"stream_video":false,"stream_audio":true,"#,
        r#""video_quality":"1200-24-1280-720","video_encoder":"H.264","audio_encoder":"AAC"}}"#,
        "\n"
    );
    let first = session.start();
    assert_eq!(session.exchange(&first, set), vec![r#"{"set":[]}"#.to_owned()]);
    drop(first);

    let second = session.start();
    let lines = session.exchange(&second, "{\"action\":\"get\"}\n");

    assert_eq!(
        lines,
        vec![concat!(
            r#"{"get":{"streamAudio":true,"audioEncoder":"AAC","streamVideo":false,"#,
            r#""videoEncoder":"H.264","videoResolution":"1280x720","#,
            r#""videoFramerate":"24 fps","videoBitrate":"1200 kbps"}}"#
        )
        .to_owned()]
    );
}

#[rstest]
fn host_state_is_visible_to_clients(session: Session) {
    let service = session.start();
    service.state().set_battery_level(150).expect("battery");
    service.state().set_foreground(true).expect("foreground");
    service.state().set_camera_in_use(true).expect("camera");

    let lines = session.exchange(
        &service,
        "[{\"action\":\"battery\"},{\"action\":\"screen\"},{\"action\":\"state\"}]\n",
    );

    assert_eq!(
        lines,
        vec![concat!(
            r#"{"battery":"100","screen":"1","#,
            r#""state":{"cameraInUse":"true","microphoneInUse":"false","activityPaused":"1"}}"#
        )
        .to_owned()]
    );
}

#[rstest]
fn malformed_lines_do_not_end_the_session(session: Session) {
    let service = session.start();
    let lines = session.exchange(&service, "[]\nnot json\n{\"action\":\"buzz\"}\n");

    assert_eq!(
        lines,
        vec![
            INVALID_REQUEST.to_owned(),
            INVALID_REQUEST.to_owned(),
            r#"{"buzz":[]}"#.to_owned(),
        ]
    );
}
