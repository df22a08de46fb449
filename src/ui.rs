use crate::models::{Leader, Side, Snapshot};

pub fn render_index(snapshot: &Snapshot) -> String {
    let guess = match snapshot.guess {
        Some(side) => format!("You picked: {}", side.label()),
        None => "No guess yet".to_string(),
    };
    let (heads_bar, tails_bar) = match snapshot.leader {
        Leader::Tails => ("bar", "bar lead"),
        Leader::Heads | Leader::Even => ("bar lead", "bar"),
    };

    INDEX_HTML
        .replace("{{FACE}}", face_glyph(snapshot.face))
        .replace("{{GUESS}}", &guess)
        .replace("{{MESSAGE}}", &escape(&snapshot.message))
        .replace("{{HEADS}}", &snapshot.heads.to_string())
        .replace("{{TAILS}}", &snapshot.tails.to_string())
        .replace("{{TOTAL}}", &snapshot.total.to_string())
        .replace("{{CORRECT}}", &snapshot.correct.to_string())
        .replace("{{ACCURACY}}", &format!("{:.1}", snapshot.accuracy_pct))
        .replace("{{HEADS_PCT}}", &format!("{:.1}", snapshot.heads_pct))
        .replace("{{TAILS_PCT}}", &format!("{:.1}", snapshot.tails_pct))
        .replace("{{HEADS_BAR}}", heads_bar)
        .replace("{{TAILS_BAR}}", tails_bar)
}

fn face_glyph(side: Side) -> &'static str {
    match side {
        Side::Heads => "H",
        Side::Tails => "T",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Coin Toss Playground</title>
  <style>
    :root {
      --bg: #1f2a44;
      --card: rgba(255, 255, 255, 0.08);
      --ink: #f4f1ea;
      --muted: #b8c0d4;
      --accent: #f5b942;
      --lead: rgba(124, 221, 124, 0.75);
      --idle: rgba(255, 255, 255, 0.35);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, #33446b, var(--bg) 70%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 24px;
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    .stage {
      display: grid;
      justify-items: center;
      gap: 12px;
    }

    .coin {
      width: 120px;
      height: 120px;
      border-radius: 50%;
      background: var(--accent);
      color: var(--bg);
      display: grid;
      place-items: center;
      font-size: 3rem;
      font-weight: 700;
      transition: transform 80ms ease;
    }

    .coin.turned {
      transform: rotateY(180deg);
    }

    .message,
    .guess {
      margin: 0;
      text-align: center;
    }

    .guess {
      color: var(--muted);
    }

    .row {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      justify-content: center;
    }

    form {
      margin: 0;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--ink);
      color: var(--bg);
    }

    button:disabled {
      opacity: 0.6;
      cursor: not-allowed;
    }

    button.reset {
      background: transparent;
      color: var(--muted);
      border: 1px solid var(--muted);
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(130px, 1fr));
      gap: 12px;
    }

    .stat {
      background: var(--card);
      border-radius: 14px;
      padding: 14px;
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
    }

    .bars {
      display: grid;
      gap: 8px;
    }

    .track {
      background: rgba(255, 255, 255, 0.1);
      border-radius: 999px;
      height: 14px;
      overflow: hidden;
    }

    .bar {
      height: 100%;
      background: var(--idle);
    }

    .bar.lead {
      background: var(--lead);
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Coin Toss Playground</h1>

    <section class="stage">
      <div class="coin" id="coin"><span id="coinFace">{{FACE}}</span></div>
      <p class="guess" id="currentGuess">{{GUESS}}</p>
      <p class="message" id="message">{{MESSAGE}}</p>
    </section>

    <section class="row">
      <form method="post" action="/guess/heads"><button type="submit" data-guess="heads">Heads</button></form>
      <form method="post" action="/guess/tails"><button type="submit" data-guess="tails">Tails</button></form>
    </section>

    <section class="row">
      <form method="post" action="/flip/1"><button type="submit" data-flip="1">Flip 1</button></form>
      <form method="post" action="/flip/10"><button type="submit" data-flip="10">Flip 10</button></form>
      <form method="post" action="/flip/50"><button type="submit" data-flip="50">Flip 50</button></form>
      <form method="post" action="/flip/100"><button type="submit" data-flip="100">Flip 100</button></form>
    </section>

    <section class="stats">
      <div class="stat"><span class="label">Heads</span><span class="value" id="headsCount">{{HEADS}}</span></div>
      <div class="stat"><span class="label">Tails</span><span class="value" id="tailsCount">{{TAILS}}</span></div>
      <div class="stat"><span class="label">Total flips</span><span class="value" id="totalFlips">{{TOTAL}}</span></div>
      <div class="stat"><span class="label">Correct</span><span class="value" id="correctGuesses">{{CORRECT}}</span></div>
      <div class="stat"><span class="label">Accuracy</span><span class="value" id="accuracy">{{ACCURACY}}%</span></div>
    </section>

    <section class="bars">
      <div class="track"><div class="{{HEADS_BAR}}" id="headsBar" style="width: {{HEADS_PCT}}%"></div></div>
      <div class="track"><div class="{{TAILS_BAR}}" id="tailsBar" style="width: {{TAILS_PCT}}%"></div></div>
    </section>

    <section class="row">
      <form method="post" action="/reset"><button class="reset" type="submit" id="reset">Reset progress</button></form>
    </section>
  </main>

  <script>
    const el = {
      coin: document.getElementById('coin'),
      coinFace: document.getElementById('coinFace'),
      message: document.getElementById('message'),
      currentGuess: document.getElementById('currentGuess'),
      headsCount: document.getElementById('headsCount'),
      tailsCount: document.getElementById('tailsCount'),
      totalFlips: document.getElementById('totalFlips'),
      correctGuesses: document.getElementById('correctGuesses'),
      accuracy: document.getElementById('accuracy'),
      headsBar: document.getElementById('headsBar'),
      tailsBar: document.getElementById('tailsBar'),
    };
    const actionButtons = Array.from(document.querySelectorAll('[data-guess], [data-flip]'));
    let polling = null;

    const label = (side) => (side === 'heads' ? 'Heads' : 'Tails');

    const render = (s) => {
      el.coinFace.textContent = s.face === 'heads' ? 'H' : 'T';
      el.coin.classList.toggle('turned', s.turned);
      el.currentGuess.textContent = s.guess ? `You picked: ${label(s.guess)}` : 'No guess yet';
      el.message.textContent = s.message;
      el.headsCount.textContent = s.heads;
      el.tailsCount.textContent = s.tails;
      el.totalFlips.textContent = s.total;
      el.correctGuesses.textContent = s.correct;
      el.accuracy.textContent = `${s.accuracy_pct.toFixed(1)}%`;
      el.headsBar.style.width = `${s.heads_pct.toFixed(1)}%`;
      el.tailsBar.style.width = `${s.tails_pct.toFixed(1)}%`;
      el.headsBar.classList.toggle('lead', s.leader !== 'tails');
      el.tailsBar.classList.toggle('lead', s.leader === 'tails');
      actionButtons.forEach((button) => {
        button.disabled = s.is_flipping;
      });
    };

    const call = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined,
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const refresh = () => call('GET', '/api/state').then(render);

    const startPolling = () => {
      if (!polling) {
        polling = setInterval(() => refresh().catch(() => {}), 70);
      }
    };

    const stopPolling = () => {
      clearInterval(polling);
      polling = null;
    };

    const report = (err) => {
      el.message.textContent = err.message;
    };

    document.querySelectorAll('form').forEach((form) => {
      form.addEventListener('submit', (event) => {
        event.preventDefault();
        const button = form.querySelector('button');
        if (button.dataset.guess) {
          call('POST', '/api/guess', { side: button.dataset.guess }).then(render).catch(report);
        } else if (button.dataset.flip) {
          startPolling();
          call('POST', '/api/flip', { times: Number(button.dataset.flip) })
            .then(render)
            .catch(report)
            .finally(stopPolling);
        } else {
          call('POST', '/api/reset').then(render).catch(report);
        }
      });
    });

    refresh().catch(report);
  </script>
</body>
</html>
"#;
